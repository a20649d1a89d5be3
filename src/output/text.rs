use crate::converter::ConversionTable;
use crate::error::Error;
use crate::output::Output;

use std::io::Write;

pub struct TextOutput<W: Write> {
    output_stream: W,
}

impl<W: Write> TextOutput<W> {
    pub fn new(output_stream: W) -> Self {
        Self { output_stream }
    }

    pub fn into_inner(self) -> W {
        self.output_stream
    }
}

impl<W: Write> Output for TextOutput<W> {
    fn write_table(&mut self, table: &ConversionTable) -> Result<(), Error> {
        if table.is_empty() {
            self.output_stream.write_all("no rates loaded yet\n".as_bytes())?;
            return Ok(());
        }

        if let Some(date) = table.as_of() {
            self.output_stream
                .write_all(format!("rates as of {}\n", date.format("%Y-%m-%d")).as_bytes())?;
        }
        for (position, entry) in table.entries().iter().enumerate() {
            let marker = if table.focused() == Some(position) {
                '>'
            } else {
                ' '
            };
            self.output_stream.write_all(
                format!(
                    "{} {:>2} {} {:<20} {:>16}\n",
                    marker,
                    position,
                    entry.code(),
                    entry.name(),
                    entry.output().unwrap_or_default()
                )
                .as_bytes(),
            )?;
        }
        self.output_stream.flush()?;
        Ok(())
    }

    fn write_error(&mut self, message: &str, error: &Error) -> Result<(), Error> {
        self.output_stream
            .write_all(format!("{message} ({error})\n").as_bytes())?;
        self.output_stream.flush()?;
        Ok(())
    }

    fn write_message(&mut self, message: &str) -> Result<(), Error> {
        self.output_stream
            .write_all(format!("{message}\n").as_bytes())?;
        self.output_stream.flush()?;
        Ok(())
    }
}
