use crate::converter::ConversionTable;
use crate::error::Error;

mod text;
pub use crate::output::text::TextOutput;

pub trait Output {
    fn write_table(&mut self, table: &ConversionTable) -> Result<(), Error>;
    fn write_error(&mut self, message: &str, error: &Error) -> Result<(), Error>;
    fn write_message(&mut self, message: &str) -> Result<(), Error>;
}
