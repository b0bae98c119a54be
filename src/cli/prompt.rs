// Interactive argument collection
//
// Prompts for each declared argument in order, coercing operator input to
// the declared type and re-prompting on invalid input. Ctrl-C aborts the
// whole collection back to the menu.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::output;
use crate::tools::{ArgKind, ArgValue, ArgumentSpec, Tool, ToolArgs};

/// Coerce one line of operator input to the spec's declared type.
///
/// Returns a re-prompt message on input that cannot be coerced. The caller
/// handles empty-input-takes-default before calling this.
pub fn coerce_input(spec: &ArgumentSpec, input: &str) -> Result<ArgValue, String> {
    match spec.kind {
        ArgKind::Bool => match input.to_lowercase().as_str() {
            "y" | "yes" | "true" | "1" => Ok(ArgValue::Bool(true)),
            "n" | "no" | "false" | "0" => Ok(ArgValue::Bool(false)),
            "" if !spec.required => Ok(ArgValue::Bool(false)),
            _ => Err("Please enter: yes/no (y/n)".to_string()),
        },
        ArgKind::Int => input
            .parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|_| "Please enter a number".to_string()),
        ArgKind::List => Ok(ArgValue::List(
            input
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
        )),
        ArgKind::String => {
            if input.is_empty() && spec.required {
                Err("This field is required".to_string())
            } else {
                Ok(ArgValue::Str(input.to_string()))
            }
        }
    }
}

/// Build the prompt line for one spec: name, default hint, required marker.
///
/// A literal empty-string default is rendered as `<use config>` so the
/// operator can tell "no input" apart from "empty string is the value".
fn prompt_line(spec: &ArgumentSpec) -> String {
    let mut prompt = format!("\n{}", spec.name);

    if let Some(default) = &spec.default {
        match default {
            ArgValue::Str(s) if s.is_empty() => prompt.push_str(" [default: <use config>]"),
            other => prompt.push_str(&format!(" [default: {}]", other)),
        }
    }

    if spec.required {
        prompt.push_str(" (required)");
    }

    prompt.push_str(": ");
    prompt
}

/// Choice list for display, excluding the blank "use config" sentinel.
fn display_choices(spec: &ArgumentSpec) -> Vec<String> {
    spec.choices
        .iter()
        .filter(|c| !matches!(c, ArgValue::Str(s) if s.is_empty()))
        .map(|c| c.to_string())
        .collect()
}

/// Prompt for every declared argument of `tool`.
///
/// Returns `None` when the operator cancels with Ctrl-C.
pub fn collect_args(tool: &dyn Tool, editor: &mut DefaultEditor) -> Result<Option<ToolArgs>> {
    let specs = tool.arguments();
    let mut args = ToolArgs::new();

    if specs.is_empty() {
        return Ok(Some(args));
    }

    println!("\nConfiguration for '{}':", tool.name());
    output::thin_rule();

    for spec in &specs {
        if !spec.description.is_empty() {
            println!("  {}", spec.description);
        }

        let choices = display_choices(spec);
        if !choices.is_empty() {
            println!("  Choices: {}", choices.join(", "));
        }

        let prompt = prompt_line(spec);

        let value = loop {
            let line = match editor.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            };
            let input = line.trim();

            if input.is_empty() {
                if let Some(default) = &spec.default {
                    break default.clone();
                }
            }

            match coerce_input(spec, input) {
                Ok(value) => break value,
                Err(msg) => println!("  {}", msg),
            }
        };

        args.set(&spec.name, value);
    }

    println!();
    Ok(Some(args))
}
