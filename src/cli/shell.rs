use std::io::{self, BufRead};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::errors::CliError;

use super::core::{CommandError, LoopControl};
use super::shell_context::{CliMode, ShellContext};

pub const SCRIPT_ENV: &str = "COMMUNITY_CORE_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    let mut source = LineSource::open(&mut context)?;
    while context.running {
        let Some(line) = source.next_line(&mut context)? else {
            break;
        };
        match handle_line(&mut context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

/// Where command lines come from. Script mode drains `ShellContext::script`,
/// which wizards read their answers from as well.
enum LineSource {
    Terminal(Box<Editor<CommandHelper, DefaultHistory>>),
    Script,
}

impl LineSource {
    fn open(context: &mut ShellContext) -> Result<Self, CliError> {
        match context.mode {
            CliMode::Script => {
                for line in io::stdin().lock().lines() {
                    context.script.push_back(line?);
                }
                Ok(LineSource::Script)
            }
            CliMode::Interactive => {
                let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
                editor.set_helper(Some(CommandHelper::new(context.command_names())));
                editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
                context.output.section("Community Core");
                context.output.info("Type `help` to list commands.");
                Ok(LineSource::Terminal(Box::new(editor)))
            }
        }
    }

    /// Next non-blank line, or `None` once input ends or the user leaves.
    fn next_line(&mut self, context: &mut ShellContext) -> Result<Option<String>, CliError> {
        let editor = match self {
            LineSource::Script => return Ok(context.script.pop_front()),
            LineSource::Terminal(editor) => editor,
        };
        loop {
            match editor.readline(&context.prompt()) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => {
                    editor.add_history_entry(line.trim()).ok();
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    if context.confirm_exit()? {
                        return Ok(None);
                    }
                }
                Err(ReadlineError::Eof) => {
                    context.output.info("Exiting shell.");
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.output.warning(format!("Could not parse `{}`: {err}", line.trim()));
            return Ok(LoopControl::Continue);
        }
    };
    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();
    context.last_command = Some(line.trim().to_string());

    let control = context.dispatch(&command, raw, &args)?;
    if control == LoopControl::Exit {
        context.running = false;
    }
    Ok(control)
}

/// Tab completion for the command word; arguments are left alone.
struct CommandHelper {
    commands: Vec<&'static str>,
}

impl CommandHelper {
    fn new(mut commands: Vec<&'static str>) -> Self {
        commands.sort_unstable();
        commands.dedup();
        Self { commands }
    }

    /// Start offset and matching names for the text before the cursor.
    fn candidates(&self, before_cursor: &str) -> (usize, Vec<&'static str>) {
        let word = before_cursor.trim_start();
        let start = before_cursor.len() - word.len();
        if word.contains(char::is_whitespace) {
            return (before_cursor.len(), Vec::new());
        }
        let needle = word.to_ascii_lowercase();
        let names = self
            .commands
            .iter()
            .copied()
            .filter(|name| name.starts_with(&needle))
            .collect();
        (start, names)
    }
}

impl Helper for CommandHelper {}
impl Hinter for CommandHelper {
    type Hint = String;
}
impl Highlighter for CommandHelper {}
impl Validator for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, names) = self.candidates(&line[..pos]);
        let pairs = names
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completes_only_the_command_word() {
        let helper = CommandHelper::new(vec!["members", "member", "messages", "member"]);
        assert_eq!(helper.candidates("  mem"), (2, vec!["member", "members"]));
        assert_eq!(helper.candidates("MES"), (0, vec!["messages"]));
        assert_eq!(helper.candidates("member ad"), (9, Vec::new()));
        assert_eq!(helper.candidates("").1.len(), 3);
    }
}
