//! Drives a [`WizardController`] from the terminal.
//!
//! The runner owns the step loop; a [`WizardInteraction`] supplies the
//! answers. Interactive sessions use `dialoguer` prompts, scripted sessions
//! read one answer per line:
//!
//! * a blank line or `-` keeps the current value,
//! * `:clear` empties the field,
//! * `:cancel` abandons the form,
//! * multi-selects take a comma separated list,
//! * after each step one of `next`, `back`, `submit` or `cancel`
//!   (blank means `next`, or `submit` on the last step).

use std::collections::VecDeque;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, MultiSelect, Select};
use indexmap::IndexSet;
use tokio::runtime::Runtime;

use crate::forms::{
    FieldInput, FieldKind, FieldSpec, FieldValue, StepOutcome, SubmitGate, SubmitHandler,
    SubmitOutcome, WizardController, WizardEffect,
};

use super::core::CommandError;
use super::output::Output;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAnswer {
    Keep,
    Value(String),
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Next,
    Back,
    Submit,
    Cancel,
}

/// Prompt for one field, shown with its current value and pending error.
pub struct FieldPrompt<'a> {
    pub spec: &'a FieldSpec,
    pub current: Option<&'a FieldValue>,
    pub error: Option<&'a str>,
    pub required: bool,
}

impl FieldPrompt<'_> {
    fn label(&self) -> String {
        let mut label = self.spec.label.to_string();
        if self.required {
            label.push_str(" *");
        }
        if let Some(error) = self.error {
            label.push_str(&format!(" ({error})"));
        }
        label
    }

    fn current_text(&self) -> String {
        self.current.map(ToString::to_string).unwrap_or_default()
    }
}

pub trait WizardInteraction {
    fn ask_field(&mut self, prompt: &FieldPrompt<'_>) -> Result<FieldAnswer, CommandError>;

    fn choose_action(
        &mut self,
        can_go_back: bool,
        final_step: bool,
    ) -> Result<StepAction, CommandError>;
}

#[derive(Debug)]
pub enum WizardRun<T> {
    Completed { output: T, route: &'static str },
    Cancelled,
}

pub struct WizardRunner<'a> {
    output: Output,
    runtime: &'a Runtime,
}

impl<'a> WizardRunner<'a> {
    pub fn new(output: Output, runtime: &'a Runtime) -> Self {
        Self { output, runtime }
    }

    pub fn run<H: SubmitHandler>(
        &self,
        wizard: &mut WizardController,
        handler: &H,
        interaction: &mut dyn WizardInteraction,
    ) -> Result<WizardRun<H::Output>, CommandError> {
        let mut ask_fields = true;
        loop {
            let Some(step) = wizard.step() else {
                return Ok(WizardRun::Cancelled);
            };
            if ask_fields {
                self.output.section(format!(
                    "Step {} of {}: {}",
                    wizard.current_step(),
                    wizard.total_steps(),
                    step.label
                ));
                if !step.description.is_empty() {
                    self.output.info(step.description);
                }
                // After a blocked move only the fields in error are asked again.
                let focused = !wizard.errors().is_empty();
                for spec in step.fields {
                    if focused && wizard.errors().get(spec.name).is_none() {
                        continue;
                    }
                    if !self.ask_until_applied(wizard, spec, step.is_required(spec.name), interaction)? {
                        return Ok(self.cancelled());
                    }
                }
            }
            ask_fields = true;

            let action = interaction.choose_action(wizard.can_go_back(), wizard.is_final_step())?;
            match action {
                StepAction::Cancel => return Ok(self.cancelled()),
                StepAction::Back => {
                    let outcome = wizard.previous()?;
                    self.render(wizard, &outcome.effects());
                }
                StepAction::Next | StepAction::Submit if !wizard.is_final_step() => {
                    let outcome = wizard.next()?;
                    if let StepOutcome::Moved { step } = &outcome {
                        tracing::debug!(wizard = wizard.definition().name, step, "advanced");
                    }
                    self.render(wizard, &outcome.effects());
                }
                StepAction::Next | StepAction::Submit => match wizard.begin_submit()? {
                    SubmitGate::Blocked { focus, notice } => {
                        self.render(
                            wizard,
                            &[WizardEffect::Notify(notice), WizardEffect::Focus(focus)],
                        );
                    }
                    SubmitGate::Ready => {
                        self.output.info("Submitting...");
                        let result = self.runtime.block_on(handler.submit(wizard.record()));
                        let outcome = wizard.finish_submit(handler, result);
                        let route = self.render(wizard, &outcome.effects());
                        match outcome {
                            SubmitOutcome::Completed {
                                output,
                                navigate_to,
                                ..
                            } => {
                                return Ok(WizardRun::Completed {
                                    output,
                                    route: route.unwrap_or(navigate_to),
                                })
                            }
                            // Retry or cancel from the same step without re-entering it.
                            SubmitOutcome::Failed { .. } | SubmitOutcome::Blocked { .. } => {
                                ask_fields = false;
                            }
                        }
                    }
                },
            }
        }
    }

    /// Returns `false` when the user cancelled.
    fn ask_until_applied(
        &self,
        wizard: &mut WizardController,
        spec: &FieldSpec,
        required: bool,
        interaction: &mut dyn WizardInteraction,
    ) -> Result<bool, CommandError> {
        loop {
            let answer = {
                let prompt = FieldPrompt {
                    spec,
                    current: wizard.record().get(spec.name),
                    error: wizard.errors().get(spec.name),
                    required,
                };
                interaction.ask_field(&prompt)?
            };
            let raw = match answer {
                FieldAnswer::Keep => return Ok(true),
                FieldAnswer::Cancel => return Ok(false),
                FieldAnswer::Value(raw) => raw,
            };
            match field_input(spec, &raw) {
                Ok(input) => match wizard.apply(spec.name, input) {
                    Ok(()) => return Ok(true),
                    Err(err) => self.output.warning(err),
                },
                Err(message) => self.output.warning(message),
            }
        }
    }

    /// Shows the effects of a transition and returns the requested route, if any.
    fn render(&self, wizard: &WizardController, effects: &[WizardEffect]) -> Option<&'static str> {
        let mut route = None;
        for effect in effects {
            match effect {
                WizardEffect::ScrollToTop => {}
                WizardEffect::Notify(notice) => self.output.notice(notice),
                WizardEffect::Focus(name) => {
                    let label = wizard
                        .definition()
                        .fields()
                        .find(|spec| spec.name == name)
                        .map_or(name.as_str(), |spec| spec.label);
                    for (_, message) in wizard.errors().iter() {
                        self.output.warning(message);
                    }
                    self.output.info(format!("Check {label} first."));
                }
                WizardEffect::NavigateTo(target) => route = Some(*target),
            }
        }
        route
    }

    fn cancelled<T>(&self) -> WizardRun<T> {
        self.output.warning("Form cancelled. Nothing was saved.");
        WizardRun::Cancelled
    }
}

/// Converts one typed answer into the edit for `spec`.
pub fn field_input(spec: &FieldSpec, raw: &str) -> Result<FieldInput, String> {
    match spec.kind {
        FieldKind::Text | FieldKind::Date | FieldKind::Choice(_) => {
            Ok(FieldInput::Text(raw.trim().to_string()))
        }
        FieldKind::Number => Ok(FieldInput::Numeric(raw.trim().to_string())),
        FieldKind::Flag => parse_flag(raw)
            .map(FieldInput::Flag)
            .ok_or_else(|| format!("{}: answer yes or no", spec.label)),
        FieldKind::Set(options) => {
            let mut items = IndexSet::new();
            for part in raw.split(',').map(str::trim).filter(|part| !part.is_empty()) {
                let option = options
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(part))
                    .ok_or_else(|| {
                        format!("`{part}` is not one of: {}", options.join(", "))
                    })?;
                items.insert(option.to_string());
            }
            Ok(FieldInput::Replace(FieldValue::Set(items)))
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" | "on" | "x" => Some(true),
        "n" | "no" | "false" | "0" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Answers taken from queued stdin lines.
pub struct ScriptInteraction<'a> {
    lines: &'a mut VecDeque<String>,
    output: Output,
}

impl<'a> ScriptInteraction<'a> {
    pub fn new(lines: &'a mut VecDeque<String>, output: Output) -> Self {
        Self { lines, output }
    }
}

impl WizardInteraction for ScriptInteraction<'_> {
    fn ask_field(&mut self, prompt: &FieldPrompt<'_>) -> Result<FieldAnswer, CommandError> {
        let Some(line) = self.lines.pop_front() else {
            return Ok(FieldAnswer::Cancel);
        };
        let answer = line.trim();
        Ok(match answer {
            "" | "-" => FieldAnswer::Keep,
            ":cancel" => FieldAnswer::Cancel,
            ":clear" => FieldAnswer::Value(String::new()),
            _ => {
                self.output.line(format!("  {}: {answer}", prompt.spec.label));
                FieldAnswer::Value(answer.to_string())
            }
        })
    }

    fn choose_action(
        &mut self,
        can_go_back: bool,
        final_step: bool,
    ) -> Result<StepAction, CommandError> {
        while let Some(line) = self.lines.pop_front() {
            match line.trim().to_ascii_lowercase().as_str() {
                "" if final_step => return Ok(StepAction::Submit),
                "" | "next" | "n" => return Ok(StepAction::Next),
                "back" | "b" if can_go_back => return Ok(StepAction::Back),
                "submit" | "s" => return Ok(StepAction::Submit),
                "cancel" | ":cancel" | "q" => return Ok(StepAction::Cancel),
                other => self
                    .output
                    .warning(format!("Expected next, back, submit or cancel, got `{other}`.")),
            }
        }
        Ok(StepAction::Cancel)
    }
}

/// Terminal prompts for interactive sessions.
pub struct DialoguerInteraction<'a> {
    theme: &'a ColorfulTheme,
}

impl<'a> DialoguerInteraction<'a> {
    pub fn new(theme: &'a ColorfulTheme) -> Self {
        Self { theme }
    }
}

impl WizardInteraction for DialoguerInteraction<'_> {
    fn ask_field(&mut self, prompt: &FieldPrompt<'_>) -> Result<FieldAnswer, CommandError> {
        let label = prompt.label();
        let answer = match prompt.spec.kind {
            FieldKind::Flag => {
                let current = matches!(prompt.current, Some(FieldValue::Flag(true)));
                Confirm::with_theme(self.theme)
                    .with_prompt(label)
                    .default(current)
                    .interact_opt()?
                    .map(|checked| FieldAnswer::Value(if checked { "yes" } else { "no" }.into()))
            }
            FieldKind::Choice(options) => {
                let current = prompt.current_text();
                let labels: Vec<&str> = options.iter().map(|option| option.label).collect();
                let default = options
                    .iter()
                    .position(|option| option.value == current)
                    .unwrap_or(0);
                Select::with_theme(self.theme)
                    .with_prompt(label)
                    .items(&labels)
                    .default(default)
                    .interact_opt()?
                    .map(|idx| FieldAnswer::Value(options[idx].value.to_string()))
            }
            FieldKind::Set(options) => {
                let chosen: Vec<bool> = match prompt.current {
                    Some(FieldValue::Set(items)) => {
                        options.iter().map(|option| items.contains(*option)).collect()
                    }
                    _ => vec![false; options.len()],
                };
                MultiSelect::with_theme(self.theme)
                    .with_prompt(label)
                    .items(options)
                    .defaults(&chosen)
                    .interact_opt()?
                    .map(|picked| {
                        let names: Vec<&str> = picked.into_iter().map(|idx| options[idx]).collect();
                        FieldAnswer::Value(names.join(","))
                    })
            }
            FieldKind::Text | FieldKind::Date | FieldKind::Number => {
                let text = Input::<String>::with_theme(self.theme)
                    .with_prompt(label)
                    .with_initial_text(prompt.current_text())
                    .allow_empty(true)
                    .interact_text()?;
                Some(if text.trim() == ":cancel" {
                    FieldAnswer::Cancel
                } else {
                    FieldAnswer::Value(text)
                })
            }
        };
        Ok(answer.unwrap_or(FieldAnswer::Cancel))
    }

    fn choose_action(
        &mut self,
        can_go_back: bool,
        final_step: bool,
    ) -> Result<StepAction, CommandError> {
        let mut actions = vec![if final_step {
            ("Submit", StepAction::Submit)
        } else {
            ("Next", StepAction::Next)
        }];
        if can_go_back {
            actions.push(("Back", StepAction::Back));
        }
        actions.push(("Cancel", StepAction::Cancel));
        let labels: Vec<&str> = actions.iter().map(|(label, _)| *label).collect();
        let picked = Select::with_theme(self.theme)
            .items(&labels)
            .default(0)
            .interact_opt()?;
        Ok(picked.map_or(StepAction::Cancel, |idx| actions[idx].1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::MEMBER_WIZARD;

    #[test]
    fn set_answers_match_options_case_insensitively() {
        let spec = MEMBER_WIZARD
            .fields()
            .find(|spec| spec.name == "skills")
            .copied()
            .unwrap();
        let input = field_input(&spec, "singing, cooking").unwrap();
        let FieldInput::Replace(FieldValue::Set(items)) = input else {
            panic!("expected a set");
        };
        assert_eq!(items.iter().collect::<Vec<_>>(), vec!["Singing", "Cooking"]);
        assert!(field_input(&spec, "juggling").is_err());
    }

    #[test]
    fn flags_accept_common_spellings() {
        let spec = FieldSpec::flag("baptized", "Baptized");
        assert_eq!(field_input(&spec, "Yes"), Ok(FieldInput::Flag(true)));
        assert_eq!(field_input(&spec, "no"), Ok(FieldInput::Flag(false)));
        assert!(field_input(&spec, "maybe").is_err());
    }

    #[test]
    fn script_actions_default_by_step() {
        let mut lines: VecDeque<String> = ["", "", "bogus", "back"].map(String::from).into();
        let output = Output::new(Default::default(), true);
        let mut script = ScriptInteraction::new(&mut lines, output);
        assert_eq!(script.choose_action(false, false).unwrap(), StepAction::Next);
        assert_eq!(script.choose_action(true, true).unwrap(), StepAction::Submit);
        assert_eq!(script.choose_action(true, false).unwrap(), StepAction::Back);
        assert_eq!(script.choose_action(true, false).unwrap(), StepAction::Cancel);
    }
}
