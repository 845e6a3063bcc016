use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::Error,
    models::bar_series::{COLUMNS, PriceBarSeries},
};

/// Output path meaning "write to stdout".
pub const STDOUT_PATH: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

pub trait BarSink {
    /// The type of output returned after a successful write operation.
    ///
    /// File sinks return the number of bars written.
    type Output;

    /// Writes a converted series to the destination.
    fn write(&mut self, bars: &PriceBarSeries) -> Result<Self::Output, Error>;
}

/// One header row plus one row per bar, in [`COLUMNS`] order.
pub struct CsvSink<W: Write> {
    writer: W,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> BarSink for CsvSink<W> {
    type Output = usize;

    fn write(&mut self, bars: &PriceBarSeries) -> Result<usize, Error> {
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut self.writer);
        wtr.write_record(COLUMNS)?;
        for bar in bars {
            wtr.serialize(bar)?;
        }
        wtr.flush()?;
        debug!(bars = bars.len(), "wrote csv");
        Ok(bars.len())
    }
}

/// A pretty-printed JSON array of bars.
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> BarSink for JsonSink<W> {
    type Output = usize;

    fn write(&mut self, bars: &PriceBarSeries) -> Result<usize, Error> {
        serde_json::to_writer_pretty(&mut self.writer, bars)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        debug!(bars = bars.len(), "wrote json");
        Ok(bars.len())
    }
}

/// Opens `path` for writing, or stdout for [`STDOUT_PATH`].
pub fn open_output(path: &Path) -> Result<Box<dyn Write>, Error> {
    if path.as_os_str() == STDOUT_PATH {
        Ok(Box::new(io::stdout()))
    } else {
        Ok(Box::new(BufWriter::new(File::create(path)?)))
    }
}

pub fn sink_for(format: OutputFormat, path: &Path) -> Result<Box<dyn BarSink<Output = usize>>, Error> {
    let writer = open_output(path)?;
    Ok(match format {
        OutputFormat::Csv => Box::new(CsvSink::new(writer)),
        OutputFormat::Json => Box::new(JsonSink::new(writer)),
    })
}
