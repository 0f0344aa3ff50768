//! Pre-built files and temp-file helpers for common testing scenarios.

use crate::config::CsvConfig;
use crate::schema::CsvSchema;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Header plus three two-column rows, trailing newline.
pub const WITH_HEADER_WITH_LAST_NL: &str = "col1,col2\n101,102\n201,202\n301,302\n";

/// As [`WITH_HEADER_WITH_LAST_NL`] without the final newline.
pub const WITH_HEADER_WITHOUT_LAST_NL: &str = "col1,col2\n101,102\n201,202\n301,302";

/// Three two-column rows, no header.
pub const WITHOUT_HEADER_WITH_LAST_NL: &str = "101,102\n201,202\n301,302\n";

/// Tab-separated variant of [`WITH_HEADER_WITH_LAST_NL`].
pub const WITH_HEADER_WITH_LAST_NL_TSV: &str = "col1\tcol2\n101\t102\n201\t202\n301\t302\n";

/// Third line has two columns where the first has three.
pub const DIFFERENT_NUMBER_OF_COLUMNS: &str = "a,a,a\nb,b,b\nc,c\n";

/// A delimited file on disk that is deleted when dropped.
///
/// # Example
///
/// ```
/// use partial_csv::CsvConfig;
/// use partial_csv::testing::TempCsv;
///
/// let file = TempCsv::new("a,b\n1,2\n").unwrap();
/// let schema = file.schema(CsvConfig::default()).unwrap();
/// assert_eq!(schema.column_count(), 2);
/// ```
pub struct TempCsv {
    file: NamedTempFile,
}

impl TempCsv {
    /// Write `content` to a fresh `.csv` temp file.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be created or written.
    pub fn new(content: impl AsRef<[u8]>) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .context("create temp csv")?;
        file.write_all(content.as_ref()).context("write temp csv")?;
        file.flush().context("flush temp csv")?;
        Ok(Self { file })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Map the file and build a shared schema over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be opened.
    pub fn schema(&self, config: CsvConfig) -> Result<Arc<CsvSchema>> {
        let schema = CsvSchema::open(self.path(), config)
            .with_context(|| format!("open {}", self.path().display()))?;
        Ok(schema.shared())
    }
}

/// Deterministic content: an optional header, then `rows` lines of `cols`
/// fields whose widths vary so that line lengths differ.
///
/// # Example
///
/// ```
/// use partial_csv::testing::generate_csv;
///
/// assert_eq!(generate_csv(2, 2, true), "c0,c1\n0,0x\n1x,1x\n");
/// ```
#[must_use]
pub fn generate_csv(rows: usize, cols: usize, header: bool) -> String {
    let mut out = String::new();
    if header {
        let names: Vec<String> = (0..cols).map(|c| format!("c{c}")).collect();
        out.push_str(&names.join(","));
        out.push('\n');
    }
    for r in 0..rows {
        let fields: Vec<String> = (0..cols)
            .map(|c| format!("{r}{}", "x".repeat((r + c) % 2 + (r * c) % 3)))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}
