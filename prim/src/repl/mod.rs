//! REPL (Read-Eval-Print Loop) for Prim
//!
//! Each line is one expression, evaluated in a fresh base environment.

use crate::error::PrimError;
use crate::interp::{builtin_registry, InterpConfig, Interpreter, Value};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;

const PROMPT: &str = "prim> ";
const HISTORY_FILE: &str = ".prim_history";

/// REPL state
pub struct Repl {
    editor: DefaultEditor,
    interpreter: Interpreter,
    history_path: Option<PathBuf>,
}

impl Repl {
    /// Create a new REPL
    pub fn new(config: InterpConfig) -> RlResult<Self> {
        let editor = DefaultEditor::new()?;
        let interpreter = Interpreter::with_config(config);

        // Try to find history file in home directory
        let history_path = dirs_home().map(|h| h.join(HISTORY_FILE));

        let mut repl = Repl {
            editor,
            interpreter,
            history_path,
        };

        if let Some(ref path) = repl.history_path {
            let _ = repl.editor.load_history(path);
        }

        Ok(repl)
    }

    /// Run the REPL
    pub fn run(&mut self) -> RlResult<()> {
        println!("Prim REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for help, :quit to exit.\n");

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = self.editor.add_history_entry(line);

                    if line.starts_with(':') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    self.eval_input(line);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err}");
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_path {
            let _ = self.editor.save_history(path);
        }

        Ok(())
    }

    /// Handle REPL commands (starting with :). Returns true to exit.
    fn handle_command(&mut self, cmd: &str) -> bool {
        match cmd {
            ":quit" | ":q" | ":exit" => {
                println!("Goodbye!");
                true
            }
            ":help" | ":h" | ":?" => {
                self.print_help();
                false
            }
            ":builtins" | ":b" => {
                self.print_builtins();
                false
            }
            ":clear" => {
                print!("\x1B[2J\x1B[1;1H");
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type :help for help.");
                false
            }
        }
    }

    fn print_help(&self) {
        let kw = &self.interpreter.config().keywords;
        println!("Prim REPL Commands:");
        println!("  :help, :h, :?    Show this help");
        println!("  :builtins, :b    List builtin operators");
        println!("  :quit, :q        Exit the REPL");
        println!("  :clear           Clear the screen");
        println!();
        println!("You can enter:");
        println!("  - Literals: 42, 2.5, \"text\", {}, {}", kw.true_lit, kw.false_lit);
        println!("  - Calls: (+ 1 2), (++ \"a\" \"b\")");
        println!("  - Lambdas: ((lambda (x y) (* x y)) 6 7)");
        println!("  - Conditionals: (if (< 1 2) \"yes\" \"no\")");
    }

    fn print_builtins(&self) {
        let mut builtins: Vec<_> = builtin_registry().values().collect();
        builtins.sort_by_key(|b| b.name);
        for b in builtins {
            println!("  {:<4} {}", b.name, b.op.signature());
        }
    }

    /// Evaluate one line and print the value or a diagnostic
    fn eval_input(&mut self, input: &str) {
        match self.evaluate(input) {
            Ok(value) => println!("{value}"),
            Err(err) => err.report("<repl>", input),
        }
    }

    fn evaluate(&mut self, input: &str) -> Result<Value, PrimError> {
        crate::eval_source(&mut self.interpreter, input)
    }
}

/// Get home directory
fn dirs_home() -> Option<PathBuf> {
    #[cfg(windows)]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::ErrorKind;

    fn repl() -> Repl {
        Repl::new(InterpConfig::default()).unwrap()
    }

    #[test]
    fn test_handle_command_quit() {
        let mut repl = repl();
        assert!(repl.handle_command(":quit"));
        assert!(repl.handle_command(":q"));
        assert!(repl.handle_command(":exit"));
    }

    #[test]
    fn test_handle_command_non_quit() {
        let mut repl = repl();
        assert!(!repl.handle_command(":help"));
        assert!(!repl.handle_command(":builtins"));
        assert!(!repl.handle_command(":clear"));
        assert!(!repl.handle_command(":unknown"));
    }

    #[test]
    fn test_evaluate_expression() {
        let mut repl = repl();
        assert_eq!(repl.evaluate("(* 6 7)").unwrap(), Value::Int(42));
    }

    #[test]
    fn test_lines_do_not_share_bindings() {
        let mut repl = repl();
        assert!(repl.evaluate("((lambda (x) x) 1)").is_ok());
        let err = repl.evaluate("x").unwrap_err();
        assert!(matches!(
            err,
            PrimError::Runtime(e) if e.kind == ErrorKind::UndefinedIdentifier("x".to_string())
        ));
    }

    #[test]
    fn test_evaluate_parse_error() {
        let mut repl = repl();
        assert!(matches!(repl.evaluate("(+ 1"), Err(PrimError::Compile(_))));
    }

    #[test]
    fn test_eval_input_does_not_panic_on_error() {
        let mut repl = repl();
        repl.eval_input("(1 2)");
    }

    #[test]
    fn test_constants() {
        assert_eq!(PROMPT, "prim> ");
        assert_eq!(HISTORY_FILE, ".prim_history");
    }
}
