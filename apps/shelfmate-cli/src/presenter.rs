use std::io::{BufRead, Write};

use rand::seq::SliceRandom;
use rand::Rng;

use shelfmate_core::catalog::CatalogStats;
use shelfmate_core::traits::Recommender;
use shelfmate_core::types::ScoredTitle;
use shelfmate_core::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input<'a> {
    Help,
    Sample,
    Stats,
    Quit,
    Title(&'a str),
}

/// A catalog title always wins over a command of the same spelling, and a
/// leading `//` escapes one slash.
fn parse_input<'l>(line: &'l str, recommender: &dyn Recommender) -> Input<'l> {
    if recommender.contains(line) {
        return Input::Title(line);
    }
    match line {
        "/help" | "/h" => Input::Help,
        "/sample" | "/s" => Input::Sample,
        "/stats" => Input::Stats,
        "/quit" | "/q" => Input::Quit,
        escaped if escaped.starts_with("//") => Input::Title(&escaped[1..]),
        title => Input::Title(title),
    }
}

/// Strips only the line terminator; titles are matched exactly.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Terminal front end over any [`Recommender`].
pub struct Presenter<'a> {
    recommender: &'a dyn Recommender,
    stats: CatalogStats,
    k: usize,
    sample_size: usize,
}

impl<'a> Presenter<'a> {
    pub fn new(recommender: &'a dyn Recommender, stats: CatalogStats, k: usize, sample_size: usize) -> Self {
        Self { recommender, stats, k, sample_size }
    }

    pub fn sample_titles<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<&str> {
        self.recommender.catalog().choose_multiple(rng, count).map(|b| b.title.as_str()).collect()
    }

    pub fn write_sample<W: Write, R: Rng + ?Sized>(&self, out: &mut W, rng: &mut R, count: usize) -> std::io::Result<()> {
        writeln!(out, "Sample Book Titles from Dataset:\n")?;
        for title in self.sample_titles(rng, count) {
            writeln!(out, "{}", title)?;
        }
        Ok(())
    }

    /// Answers one title. Returns `false` when the title is not in the catalog.
    pub fn write_answer<W: Write>(&self, out: &mut W, title: &str, k: usize, with_scores: bool) -> anyhow::Result<bool> {
        match self.recommender.recommend_scored(title, k) {
            Ok(hits) => {
                write_recommendations(out, title, &hits, with_scores)?;
                Ok(true)
            }
            Err(Error::UnknownTitle(_)) => {
                writeln!(out, "\nBook '{}' not found in the dataset. Please check the title.", title)?;
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Prints a sample, then answers one title per input line until `/quit` or EOF.
    pub fn run<I, W, R>(&self, input: &mut I, out: &mut W, rng: &mut R) -> anyhow::Result<()>
    where
        I: BufRead,
        W: Write,
        R: Rng + ?Sized,
    {
        self.write_sample(out, rng, self.sample_size)?;
        writeln!(out, "\nEnter the exact book title from the list above to get recommendations (/help for commands):")?;

        loop {
            write!(out, "Your selected book: ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                break;
            }
            let line = strip_line_ending(&line);
            if line.is_empty() {
                continue;
            }

            match parse_input(line, self.recommender) {
                Input::Help => write_help(out)?,
                Input::Sample => self.write_sample(out, rng, self.sample_size)?,
                Input::Stats => self.write_stats(out)?,
                Input::Quit => {
                    writeln!(out, "Goodbye!")?;
                    break;
                }
                Input::Title(title) => {
                    self.write_answer(out, title, self.k, false)?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_stats<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let s = &self.stats;
        writeln!(out, "Catalog Statistics")?;
        writeln!(out, "  Books loaded:        {}", self.recommender.catalog().len())?;
        writeln!(out, "  Rows read:           {}", s.rows_read)?;
        writeln!(out, "  Malformed rows:      {}", s.malformed)?;
        writeln!(out, "  Missing title/authors: {}", s.missing)?;
        writeln!(out, "  Duplicates dropped:  {}", s.duplicates)?;
        writeln!(out, "  Beyond cap:          {}", s.truncated)
    }
}

pub fn write_recommendations<W: Write>(out: &mut W, title: &str, hits: &[ScoredTitle], with_scores: bool) -> std::io::Result<()> {
    writeln!(out, "\nTop {} Recommendations for '{}':\n", hits.len(), title)?;
    for (i, hit) in hits.iter().enumerate() {
        if with_scores {
            writeln!(out, "{}. {}  (score={:.4})", i + 1, hit.title, hit.score)?;
        } else {
            writeln!(out, "{}. {}", i + 1, hit.title)?;
        }
    }
    Ok(())
}

fn write_help<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "Type an exact, case-sensitive book title to get recommendations.")?;
    writeln!(out, "Commands:")?;
    writeln!(out, "  /help, /h      Show this help")?;
    writeln!(out, "  /sample, /s    Show another sample of titles")?;
    writeln!(out, "  /stats         Show catalog statistics")?;
    writeln!(out, "  /quit, /q      Exit")?;
    writeln!(out, "Start a title with // to query a title beginning with /, e.g. //q for \"/q\".")
}
