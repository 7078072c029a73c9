//! Line-based console prompts and the city / month / day resolver.

use std::io::{self, BufRead, Write};

use bikeshare_core::error::Result;
use bikeshare_core::filters::{Selection, CITY_CHOICES, DAY_CHOICES, MONTH_CHOICES};
use bikeshare_core::formatting::section_rule;
use tracing::debug;

// ── Console ───────────────────────────────────────────────────────────────────

/// A prompt/answer channel over any reader and writer.
///
/// Production code wraps stdin/stdout; tests use a `Cursor` and a `Vec<u8>`.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)
    }

    /// Write each line in `lines`.
    pub fn say_all<S: AsRef<str>>(&mut self, lines: &[S]) -> io::Result<()> {
        for line in lines {
            writeln!(self.output, "{}", line.as_ref())?;
        }
        Ok(())
    }

    /// Show `question`, then read one line of input.
    ///
    /// The answer is trimmed and lower-cased. Returns `None` once the input
    /// is exhausted.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        Ok(self
            .ask_line(question)?
            .map(|line| line.trim().to_lowercase()))
    }

    /// Like [`Console::ask`], but only the line terminator is stripped, so
    /// surrounding whitespace survives.
    pub fn ask_exact(&mut self, question: &str) -> io::Result<Option<String>> {
        Ok(self.ask_line(question)?.map(|line| line.to_lowercase()))
    }

    fn ask_line(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;

        // Bytes that are not UTF-8 become U+FFFD and fail any vocabulary check.
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            // Keep the terminal tidy when input ends mid-prompt.
            writeln!(self.output)?;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Borrow the underlying writer.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Give back the reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

// ── Selectors ─────────────────────────────────────────────────────────────────

/// One of the three questions asked before loading data.
#[derive(Debug, Clone, Copy)]
pub struct Selector {
    /// Noun used in the rejection message ("city", "month", "day").
    pub kind: &'static str,
    pub question: &'static str,
    /// Accepted lower-case answers.
    pub choices: &'static [&'static str],
}

pub const CITY_SELECTOR: Selector = Selector {
    kind: "city",
    question: "Which city are you interested in? (chicago, new york city, washington) ",
    choices: &CITY_CHOICES,
};

pub const MONTH_SELECTOR: Selector = Selector {
    kind: "month",
    question: "Please choose a month from january to june or type 'all' for analyzing the whole period. ",
    choices: &MONTH_CHOICES,
};

pub const DAY_SELECTOR: Selector = Selector {
    kind: "day",
    question: "Please choose a day of the week (monday to friday) or type 'all' for analyzing the whole week. ",
    choices: &DAY_CHOICES,
};

pub const GREETING: &str = "Hello! Let's explore some US bikeshare data!";

/// Ask `selector`'s question until the answer is one of its choices.
///
/// There is no retry limit. Returns `None` if input ends first.
pub fn resolve_token<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    selector: &Selector,
) -> io::Result<Option<String>> {
    loop {
        let Some(answer) = console.ask(selector.question)? else {
            return Ok(None);
        };
        let accepted = selector.choices.contains(&answer.as_str());
        if accepted {
            console.say("Good choice!")?;
        } else {
            console.say(&format!("That's not a valid {}", selector.kind))?;
        }
        console.say("(Value received)")?;
        if accepted {
            debug!("{} selected: {}", selector.kind, answer);
            return Ok(Some(answer));
        }
    }
}

/// Greet the user and resolve city, month and day in that order.
///
/// Returns `Ok(None)` when input ends before all three are answered.
pub fn resolve_selection<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<Option<Selection>> {
    console.say(GREETING)?;

    let Some(city) = resolve_token(console, &CITY_SELECTOR)? else {
        return Ok(None);
    };
    let Some(month) = resolve_token(console, &MONTH_SELECTOR)? else {
        return Ok(None);
    };
    let Some(day) = resolve_token(console, &DAY_SELECTOR)? else {
        return Ok(None);
    };

    console.say(&section_rule())?;
    Selection::parse(&city, &month, &day).map(Some)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
