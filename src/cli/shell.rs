// Interactive shell
//
// Menu loop over the visible tools: display, argument collection,
// execution, result banner, and back to the menu until the operator quits.

use anyhow::Result;
use crossterm::{cursor::MoveTo, execute, terminal};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use crate::cli::{output, prompt};
use crate::interrupt;
use crate::tools::{Tool, ToolContext, ToolRegistry};

pub struct Shell {
    registry: ToolRegistry,
    root_dir: PathBuf,
}

impl Shell {
    pub fn new(registry: ToolRegistry, root_dir: PathBuf) -> Self {
        Self { registry, root_dir }
    }

    /// Run the menu loop. Returns the process exit code (0 on clean quit).
    pub fn run(&self) -> Result<i32> {
        let mut editor = DefaultEditor::new()?;

        loop {
            // One snapshot serves both the menu and execution, so a tool
            // selected from the menu can never miss from lookup.
            let all_tools = self.registry.discover(true);
            if all_tools.is_empty() {
                output::error("No tools found!");
                return Ok(1);
            }

            let visible: Vec<&Box<dyn Tool>> = all_tools.iter().filter(|t| t.visible()).collect();
            if visible.is_empty() {
                output::error("No visible tools found!");
                return Ok(1);
            }

            self.display_menu(&visible);

            let line = match editor.readline(&format!("Select a tool (1-{} or q): ", visible.len()))
            {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    println!("\nExiting...");
                    return Ok(0);
                }
                Err(e) => return Err(e.into()),
            };
            let choice = line.trim().to_lowercase();

            if choice == "q" || choice == "quit" {
                println!("\nExiting...");
                return Ok(0);
            }

            let index = match choice.parse::<usize>() {
                Ok(n) if (1..=visible.len()).contains(&n) => n - 1,
                _ => {
                    output::error("Invalid selection");
                    pause(&mut editor);
                    continue;
                }
            };
            let tool = visible[index].as_ref();

            // Argument collection; Ctrl-C aborts back to the menu.
            let args = match prompt::collect_args(tool, &mut editor)? {
                Some(args) => args,
                None => {
                    println!("\n\nCancelled.");
                    pause(&mut editor);
                    continue;
                }
            };

            // Revalidate the full mapping before executing.
            if let Err(msg) = tool.validate_args(&args) {
                output::error(&msg);
                pause(&mut editor);
                continue;
            }

            output::thin_rule();
            println!("Executing '{}'...", tool.name());
            output::thin_rule();

            interrupt::reset();
            let ctx = ToolContext::new(&self.root_dir, &self.registry);
            let result = tool.execute(&args, &ctx);
            let code = if interrupt::interrupted() {
                println!("\n\n❌ Interrupted by user");
                130
            } else {
                match result {
                    Ok(code) => code,
                    Err(e) => {
                        output::error(&format!("{:#}", e));
                        1
                    }
                }
            };

            output::result_banner(tool.name(), code);
            pause(&mut editor);
        }
    }

    fn display_menu(&self, tools: &[&Box<dyn Tool>]) {
        clear_screen();
        output::header("gdai Build System");

        for (i, tool) in tools.iter().enumerate() {
            println!("{}. {}", i + 1, tool.name());
            println!("   {}", tool.description());
            let arg_count = tool.arguments().len();
            if arg_count > 0 {
                println!("   Arguments: {}", arg_count);
            }
            println!();
        }

        println!("q. Quit");
        println!();
    }
}

fn clear_screen() {
    if io::stdout().is_terminal() {
        let _ = execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            MoveTo(0, 0)
        );
    }
}

fn pause(editor: &mut DefaultEditor) {
    let _ = editor.readline("\nPress Enter to continue...");
}
