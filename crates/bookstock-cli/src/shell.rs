//! The interactive command loop.

use bookstock_core::engine::{Action, CommandError, CommandLine, Engine, Outcome};
use bookstock_core::CatalogStore;
use rand::Rng;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "Enter command:";
pub const EMPTY_INPUT: &str = "You didn't enter a command.";
pub const NOT_UTF8: &str = "Error: command is not valid UTF-8";

/// Reads commands from `input` until end of input and writes every result
/// or failure to `output`.
#[derive(Debug)]
pub struct Shell<'a, S: ?Sized, R, I, O> {
    engine: Engine<'a, S, R>,
    input: I,
    output: O,
}

impl<'a, S, R, I, O> Shell<'a, S, R, I, O>
where
    S: CatalogStore + ?Sized,
    R: Rng,
    I: BufRead,
    O: Write,
{
    pub const fn new(store: &'a S, rng: R, input: I, output: O) -> Self {
        Self {
            engine: Engine::new(store, rng),
            input,
            output,
        }
    }

    /// Run until end of input. Returns how many commands were dispatched.
    ///
    /// Command failures are printed and never stop the loop; only I/O
    /// errors on the input or output do.
    pub fn run(&mut self) -> io::Result<usize> {
        let mut handled = 0;
        let mut buf = Vec::new();

        loop {
            writeln!(self.output, "{PROMPT}")?;
            self.output.flush()?;

            buf.clear();
            if self.input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let Ok(line) = std::str::from_utf8(&buf) else {
                log::debug!("Skipping {} bytes of non-UTF-8 input", buf.len());
                writeln!(self.output, "{NOT_UTF8}")?;
                continue;
            };

            let Some(command) = CommandLine::parse(line) else {
                writeln!(self.output, "{EMPTY_INPUT}")?;
                continue;
            };

            handled += 1;
            self.dispatch(&command)?;
        }

        Ok(handled)
    }

    fn dispatch(&mut self, command: &CommandLine) -> io::Result<()> {
        log::debug!("Dispatching {:?}", command);

        let action = match Action::from_command(command) {
            Ok(action) => action,
            Err(e) => return self.report(&e),
        };

        writeln!(self.output, "{}", action.banner())?;
        match self.engine.execute(action) {
            Ok(outcome) => self.render(&outcome),
            Err(e) => self.report(&e),
        }
    }

    fn render(&mut self, outcome: &Outcome) -> io::Result<()> {
        match outcome {
            Outcome::Books(books) if books.is_empty() => {
                writeln!(self.output, "No books found.")
            }
            Outcome::Books(books) => {
                for book in books {
                    writeln!(self.output, "{book}")?;
                }
                Ok(())
            }
            Outcome::Bought(book) => writeln!(
                self.output,
                "Bought {}. Remaining count: {}",
                book.title, book.count
            ),
            Outcome::Restocked(restocked) => writeln!(
                self.output,
                "Restocked {} copies of {}. New count: {}",
                restocked.amount, restocked.book.title, restocked.book.count
            ),
        }
    }

    fn report(&mut self, error: &CommandError) -> io::Result<()> {
        if !error.is_user_input() {
            log::warn!("Command failed: {}", error);
        }
        match error {
            CommandError::UnknownCommand(name) => {
                writeln!(self.output, "Invalid command: {name}")
            }
            other => writeln!(self.output, "Error: {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstock_core::model::{BookId, NewBook};
    use bookstock_core::schema::Database;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Cursor;

    fn catalog() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_many(&[
            NewBook::new("Animal Farm", "George Orwell")
                .with_year(1945)
                .with_count(0),
            NewBook::new("1984", "George Orwell")
                .with_year(1948)
                .with_count(2),
        ])
        .unwrap();
        db
    }

    /// Feed `script` to a shell over `db` and return what it printed.
    fn run_script(db: &Database, script: &str) -> (usize, String) {
        run_bytes(db, script.as_bytes())
    }

    fn run_bytes(db: &Database, script: &[u8]) -> (usize, String) {
        let mut output = Vec::new();
        let handled = Shell::new(
            db,
            StdRng::seed_from_u64(11),
            Cursor::new(script),
            &mut output,
        )
        .run()
        .unwrap();
        (handled, String::from_utf8(output).unwrap())
    }

    fn count_of(db: &Database, id: i64) -> i64 {
        db.get(BookId::new(id)).unwrap().unwrap().count
    }

    #[test]
    fn test_end_of_input_stops_loop() {
        let db = catalog();
        let (handled, output) = run_script(&db, "");
        assert_eq!(handled, 0);
        assert_eq!(output, format!("{PROMPT}\n"));
    }

    #[test]
    fn test_empty_lines_reprompt() {
        let db = catalog();
        let (handled, output) = run_script(&db, "\n   \n");
        assert_eq!(handled, 0);
        assert_eq!(output.matches(EMPTY_INPUT).count(), 2);
        assert_eq!(output.matches(PROMPT).count(), 3);
    }

    #[test]
    fn test_get_prints_rows() {
        let db = catalog();
        let (_, output) = run_script(&db, "get --order-by=count\n");
        assert!(output.contains("Getting books..."));
        let rows: Vec<_> = output.lines().filter(|l| l.starts_with("Id: ")).collect();
        assert_eq!(
            rows,
            [
                "Id: 1, Author: George Orwell, Title: Animal Farm, Year: 1945, Count: 0",
                "Id: 2, Author: George Orwell, Title: 1984, Year: 1948, Count: 2",
            ]
        );
    }

    #[test]
    fn test_bad_query_prints_no_rows() {
        let db = catalog();
        let (handled, output) = run_script(&db, "get --date=notadate\nget --order-by=bogus\n");
        assert_eq!(handled, 2);
        assert!(!output.contains("Id: "));
        assert!(output.contains("wrong date format"));
        assert!(output.contains("invalid order-by field"));
    }

    #[test]
    fn test_buy_reports_title_and_count() {
        let db = catalog();
        let (_, output) = run_script(&db, "buy --id=2\n");
        assert!(output.contains("Bought 1984. Remaining count: 1"));
        assert_eq!(count_of(&db, 2), 1);
    }

    #[test]
    fn test_buy_failures_leave_stock() {
        let db = catalog();
        let (handled, output) = run_script(&db, "buy --id=1\nbuy --id=9\nbuy\nbuy --id=x\n");
        assert_eq!(handled, 4);
        assert!(output.contains("out of stock"));
        assert!(output.contains("book 9 not found"));
        assert!(output.contains("missing required flag --id"));
        assert!(output.contains("invalid value for --id"));
        assert_eq!(count_of(&db, 1), 0);
        assert_eq!(count_of(&db, 2), 2);
    }

    #[test]
    fn test_restock_explicit() {
        let db = catalog();
        let (_, output) = run_script(&db, "restock --id=1 --count=5\n");
        assert!(output.contains("Restocking books..."));
        assert!(output.contains("Restocked 5 copies of Animal Farm. New count: 5"));
        assert_eq!(count_of(&db, 1), 5);
    }

    #[test]
    fn test_restock_random_book() {
        let db = catalog();
        let (_, output) = run_script(&db, "restock\n");
        assert!(output.contains("Restocked "));
        let total: i64 = db.list_all().unwrap().iter().map(|b| b.count).sum();
        assert!((3..=11).contains(&total));
    }

    #[test]
    fn test_invalid_command_keeps_looping() {
        let db = catalog();
        let (handled, output) = run_script(&db, "sell --id=1\nbuy --id=2\n");
        assert_eq!(handled, 2);
        assert!(output.contains("Invalid command: sell"));
        assert!(output.contains("Bought 1984"));
    }

    #[test]
    fn test_non_utf8_line_keeps_looping() {
        let db = catalog();
        let mut script = b"get --title=\xff\xfe\n\xff\n".to_vec();
        script.extend_from_slice(b"buy --id=2\n");

        let (handled, output) = run_bytes(&db, &script);
        assert_eq!(handled, 1);
        assert_eq!(output.matches(NOT_UTF8).count(), 2);
        assert!(output.contains("Bought 1984. Remaining count: 1"));
        assert_eq!(count_of(&db, 2), 1);
    }

    #[test]
    fn test_no_matches_message() {
        let db = catalog();
        let (_, output) = run_script(&db, "get --author=Tolstoy\n");
        assert!(output.contains("No books found."));
    }
}
