use std::io::Read;

use csv::{DeserializeRecordsIntoIter, Trim};
use serde::Deserialize;

/// One row of an invocation script: the function name followed by up to
/// three positional arguments. Empty trailing cells are dropped; an empty
/// cell before a filled one stays in place as an empty argument.
#[derive(Debug, Deserialize)]
pub struct Invocation {
    pub function: String,
    #[serde(default)]
    pub arg1: Option<String>,
    #[serde(default)]
    pub arg2: Option<String>,
    #[serde(default)]
    pub arg3: Option<String>,
}

impl Invocation {
    pub fn args(&self) -> Vec<String> {
        let cells = [&self.arg1, &self.arg2, &self.arg3];
        let filled = cells
            .iter()
            .rposition(|cell| cell.is_some())
            .map_or(0, |last| last + 1);
        cells[..filled]
            .iter()
            .map(|cell| cell.as_deref().unwrap_or_default().to_owned())
            .collect()
    }
}

/// Parses invocation scripts in CSV format
pub struct CsvInvocationParser<R> {
    iter: DeserializeRecordsIntoIter<R, Invocation>,
}

impl<R> CsvInvocationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvInvocationParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Invocation>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
