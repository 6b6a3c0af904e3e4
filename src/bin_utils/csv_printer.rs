use std::io::Write;

use csv::Writer;
use serde::Serialize;

use crate::outcome::Response;

#[derive(Debug, Serialize)]
pub struct ResponseRow {
    pub line: u64,
    pub status: &'static str,
    pub payload: String,
}

impl ResponseRow {
    pub fn new(line: u64, response: Response) -> Self {
        match response {
            Response::Success(payload) => Self {
                line,
                status: "ok",
                payload: if payload.is_null() {
                    String::new()
                } else {
                    payload.to_string()
                },
            },
            Response::Error(message) => Self {
                line,
                status: "error",
                payload: message,
            },
        }
    }
}

pub fn print_responses<W>(
    output: &mut W,
    responses: impl Iterator<Item = ResponseRow>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for row in responses {
        if let Err(err) = writer.serialize(row) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
