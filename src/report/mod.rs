mod formatter;

pub use formatter::FindingFormatter;
