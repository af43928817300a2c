//! Shell state, command dispatch, and the console-side picker collaborators.

use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use strsim::levenshtein;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::cli::output;
use crate::controls::{ControlOption, ControlSurface, OptionGroup};
use crate::core::picker::{FramePicker, PickerConfig};
use crate::core::selection::{SelectionSnapshot, SelectionUpdate};
use crate::errors::PickerError;
use crate::notify::{ChangeEvent, ChangeSink};
use crate::storage::json_store::JsonFileStore;

const STORAGE_KEY: &str = "selection";

/// Fatal shell failures.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Picker(#[from] PickerError),
    #[error("prompt failed: {0}")]
    Prompt(String),
}

/// Recoverable per-command failures, reported and swallowed by the loop.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Picker(#[from] PickerError),
    #[error("prompt failed: {0}")]
    Interaction(String),
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub(crate) const COMMANDS: &[(&str, &str)] = &[
    ("help", "help - list available commands"),
    ("status", "status - show the current selection"),
    ("models", "models - list device models by group"),
    ("palettes", "palettes - list palettes for the current model"),
    ("classes", "classes - print the derived display class list"),
    ("model", "model <name> - select a device model"),
    ("palette", "palette <id> - select a palette of the current model"),
    ("rotate", "rotate [portrait|landscape] - toggle or set orientation"),
    ("dark", "dark [on|off] - toggle or set dark mode"),
    ("reset", "reset - restore palette, orientation, and dark mode defaults"),
    ("apply", "apply <json> - apply a partial update from a JSON object"),
    ("pick", "pick <model|palette> - choose from an interactive list"),
    ("exit", "exit - leave the shell"),
];

/// Sink that mirrors every change event onto the terminal.
struct ConsoleSink;

impl ChangeSink for ConsoleSink {
    fn dispatch(&self, event: &ChangeEvent) {
        output::info(format!("[{}] {}", event.origin, event.classes.join(" ")));
    }
}

/// Terminal-facing stand-in for the bound form controls.
#[derive(Debug, Default)]
struct ConsoleControls {
    model_groups: Vec<OptionGroup>,
    palette_options: Vec<ControlOption>,
    displayed_model: Option<String>,
    displayed_palette: Option<String>,
}

impl ControlSurface for ConsoleControls {
    fn set_model_options(&mut self, groups: &[OptionGroup]) {
        self.model_groups = groups.to_vec();
    }

    fn set_palette_options(&mut self, options: &[ControlOption]) {
        self.palette_options = options.to_vec();
    }

    fn displayed_model(&self) -> Option<String> {
        self.displayed_model.clone()
    }

    fn displayed_palette(&self) -> Option<String> {
        self.displayed_palette.clone()
    }

    fn apply_selection(&mut self, snapshot: &SelectionSnapshot) {
        self.displayed_model = Some(snapshot.model.name.clone());
        self.displayed_palette = Some(snapshot.palette.id.clone());
    }
}

/// Shared shell runtime state.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    picker: FramePicker,
    controls: ConsoleControls,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let catalog = Catalog::builtin()?;
        let config = PickerConfig {
            preferred_model: None,
            storage_key: Some(STORAGE_KEY.to_string()),
        };
        let store = JsonFileStore::default_location();
        let picker = FramePicker::with_collaborators(
            catalog,
            config,
            Some(Box::new(store)),
            vec![Box::new(ConsoleSink)],
        )?;

        let mut context = Self {
            mode,
            running: true,
            picker,
            controls: ConsoleControls::default(),
        };
        context.sync_controls();
        Ok(context)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        COMMANDS.iter().map(|(name, _)| *name).collect()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        match command {
            "help" => self.cmd_help(),
            "status" => self.cmd_status(),
            "models" => self.cmd_models(),
            "palettes" => self.cmd_palettes(),
            "classes" => self.cmd_classes(),
            "model" => self.cmd_model(args),
            "palette" => self.cmd_palette(args),
            "rotate" => self.cmd_rotate(args),
            "dark" => self.cmd_dark(args),
            "reset" => self.cmd_reset(),
            "apply" => self.cmd_apply(args),
            "pick" => self.cmd_pick(args),
            "exit" | "quit" => {
                self.running = false;
                return Ok(LoopControl::Exit);
            }
            _ => {
                self.suggest_command(raw);
                return Ok(LoopControl::Continue);
            }
        }?;

        self.sync_controls();
        Ok(LoopControl::Continue)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = COMMANDS
            .iter()
            .map(|(name, _)| (levenshtein(name, input), *name))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                output::info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::info("Use `help` for usage details.");
            }
            other => output::error(other.to_string()),
        }
        Ok(())
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Exit preview shell?")
            .default(true)
            .interact()
            .map_err(|err| CliError::Prompt(err.to_string()))
    }

    fn sync_controls(&mut self) {
        let _ = self.picker.sync_controls(&mut self.controls);
    }

    fn cmd_help(&self) -> CommandResult {
        output::section("Commands");
        for (_, usage) in COMMANDS {
            output::info(format!("  {usage}"));
        }
        Ok(())
    }

    fn cmd_status(&self) -> CommandResult {
        let snapshot = self.picker.snapshot()?;
        output::section("Current selection");
        output::info(format!(
            "Model:       {} ({})",
            snapshot.model.display_label(),
            snapshot.model.name
        ));
        output::info(format!(
            "Palette:     {} ({})",
            snapshot.palette.name, snapshot.palette.id
        ));
        output::info(format!(
            "Orientation: {}",
            if snapshot.portrait {
                "portrait"
            } else {
                "landscape"
            }
        ));
        output::info(format!(
            "Dark mode:   {}",
            if snapshot.dark_mode { "on" } else { "off" }
        ));
        Ok(())
    }

    fn cmd_models(&self) -> CommandResult {
        let current = self.picker.snapshot()?.model.name;
        for group in &self.controls.model_groups {
            if group.options.is_empty() {
                continue;
            }
            output::section(&group.title);
            for option in &group.options {
                let marker = if option.value == current { "*" } else { " " };
                output::info(format!("{marker} {:<14} {}", option.value, option.label));
            }
        }
        Ok(())
    }

    fn cmd_palettes(&self) -> CommandResult {
        let current = self.picker.snapshot()?.palette.id;
        output::section("Palettes");
        for option in &self.controls.palette_options {
            let marker = if option.value == current { "*" } else { " " };
            output::info(format!("{marker} {:<14} {}", option.value, option.label));
        }
        Ok(())
    }

    fn cmd_classes(&self) -> CommandResult {
        output::info(self.picker.derived_classes()?.join(" "));
        Ok(())
    }

    fn cmd_model(&mut self, args: &[&str]) -> CommandResult {
        let &[name] = args else {
            return Err(CommandError::InvalidArguments("usage: model <name>".into()));
        };

        if self.picker.catalog().model(name).is_none() {
            output::warning(format!("Unknown model `{name}`."));
            self.suggest_model(name);
            return Ok(());
        }

        let changed = self
            .picker
            .apply_interaction(&SelectionUpdate::model(name))?;
        if !changed {
            output::info("Model unchanged.");
        }
        Ok(())
    }

    fn cmd_palette(&mut self, args: &[&str]) -> CommandResult {
        let &[id] = args else {
            return Err(CommandError::InvalidArguments("usage: palette <id>".into()));
        };

        let options = self.picker.palette_options()?;
        if !options.iter().any(|option| option.value == id) {
            let valid: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
            output::warning(format!(
                "Palette `{id}` is not available for the current model. Valid: {}.",
                valid.join(", ")
            ));
            return Ok(());
        }

        let changed = self
            .picker
            .apply_interaction(&SelectionUpdate::palette(id))?;
        if !changed {
            output::info("Palette unchanged.");
        }
        Ok(())
    }

    fn cmd_rotate(&mut self, args: &[&str]) -> CommandResult {
        let portrait = match args {
            [] => !self.picker.snapshot()?.portrait,
            ["portrait"] => true,
            ["landscape"] => false,
            _ => {
                return Err(CommandError::InvalidArguments(
                    "usage: rotate [portrait|landscape]".into(),
                ))
            }
        };

        let changed = self
            .picker
            .apply_interaction(&SelectionUpdate::portrait(portrait))?;
        if !changed {
            output::info("Orientation unchanged.");
        }
        Ok(())
    }

    fn cmd_dark(&mut self, args: &[&str]) -> CommandResult {
        let dark_mode = match args {
            [] => !self.picker.snapshot()?.dark_mode,
            ["on"] => true,
            ["off"] => false,
            _ => {
                return Err(CommandError::InvalidArguments(
                    "usage: dark [on|off]".into(),
                ))
            }
        };

        let changed = self
            .picker
            .apply_interaction(&SelectionUpdate::dark_mode(dark_mode))?;
        if !changed {
            output::info("Dark mode unchanged.");
        }
        Ok(())
    }

    fn cmd_reset(&mut self) -> CommandResult {
        if self.picker.reset()? {
            output::success("Selection reset to defaults.");
        } else {
            output::info("Already at defaults.");
        }
        Ok(())
    }

    fn cmd_apply(&mut self, args: &[&str]) -> CommandResult {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments("usage: apply <json>".into()));
        }

        let raw = args.join(" ");
        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|err| CommandError::InvalidArguments(format!("invalid JSON payload: {err}")))?;

        let changed = self.picker.apply_json_update(&value)?;
        if !changed {
            output::info("Nothing changed.");
        }
        Ok(())
    }

    fn cmd_pick(&mut self, args: &[&str]) -> CommandResult {
        if self.mode == CliMode::Script {
            return Err(CommandError::InvalidArguments(
                "`pick` needs the interactive shell".into(),
            ));
        }

        match args {
            ["model"] => {
                let mut values = Vec::new();
                let mut labels = Vec::new();
                for group in &self.controls.model_groups {
                    for option in &group.options {
                        values.push(option.value.clone());
                        labels.push(format!("{} ({})", option.label, group.title));
                    }
                }
                let current = self.picker.snapshot()?.model.name;
                let default = values.iter().position(|value| *value == current).unwrap_or(0);

                let chosen = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("Device model")
                    .items(&labels)
                    .default(default)
                    .interact_opt()
                    .map_err(|err| CommandError::Interaction(err.to_string()))?;

                if let Some(index) = chosen {
                    self.picker
                        .apply_interaction(&SelectionUpdate::model(values[index].clone()))?;
                }
                Ok(())
            }
            ["palette"] => {
                let options = self.controls.palette_options.clone();
                let labels: Vec<String> = options
                    .iter()
                    .map(|option| option.label.clone())
                    .collect();
                let current = self.picker.snapshot()?.palette.id;
                let default = options
                    .iter()
                    .position(|option| option.value == current)
                    .unwrap_or(0);

                let chosen = Select::with_theme(&ColorfulTheme::default())
                    .with_prompt("Palette")
                    .items(&labels)
                    .default(default)
                    .interact_opt()
                    .map_err(|err| CommandError::Interaction(err.to_string()))?;

                if let Some(index) = chosen {
                    self.picker
                        .apply_interaction(&SelectionUpdate::palette(options[index].value.clone()))?;
                }
                Ok(())
            }
            _ => Err(CommandError::InvalidArguments(
                "usage: pick <model|palette>".into(),
            )),
        }
    }

    fn suggest_model(&self, input: &str) {
        let mut candidates: Vec<_> = self
            .picker
            .catalog()
            .models()
            .iter()
            .map(|model| (levenshtein(&model.name, input), model.name.as_str()))
            .collect();
        candidates.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = candidates.first() {
            if *distance <= 3 {
                output::info(format!("Closest match: `{best}`."));
            }
        }
    }
}
