//! Common test helpers and utilities shared across test suite.

#![allow(dead_code)]

use dcat_harvest::{DcatRecord, Distribution, HarvestError, RecordSource, Result};
use std::cell::Cell;
use std::io::{BufRead, Read};
use std::rc::Rc;

/// Opaque collaborator handle passed through to resources.
#[derive(Debug, PartialEq, Eq)]
pub struct CatalogProxy {
    pub endpoint: String,
}

impl CatalogProxy {
    pub fn new(endpoint: &str) -> Self {
        CatalogProxy {
            endpoint: endpoint.to_string(),
        }
    }
}

/// Creates a record with one distribution per `(format, access_url)` pair.
pub fn make_record(dists: &[(&str, &str)]) -> DcatRecord {
    dists.iter().fold(DcatRecord::new(), |record, (format, url)| {
        record.add_distribution(Distribution::new(*format, *url))
    })
}

/// Creates a realistic mix of records from an open data portal feed.
///
/// With the pattern `esri rest`, records 0, 2 and 4 qualify.
pub fn create_portal_records() -> Vec<DcatRecord> {
    vec![
        make_record(&[
            ("CSV", "http://opendata.example.org/parcels.csv"),
            ("Esri REST", "http://gis.example.org/arcgis/rest/services/Parcels/MapServer"),
        ])
        .with_title("Parcels"),
        make_record(&[("KML", "http://opendata.example.org/trails.kml")]).with_title("Trails"),
        make_record(&[
            ("esri rest", "http://gis.example.org/arcgis/rest/services/Roads/FeatureServer"),
            ("ESRI REST", "http://mirror.example.org/arcgis/rest/services/Roads/FeatureServer"),
        ])
        .with_title("Roads"),
        make_record(&[]).with_title("Placeholder"),
        make_record(&[
            ("GeoJSON", "http://opendata.example.org/zoning.geojson"),
            ("Esri REST", "http://gis.example.org/arcgis/rest/services/Zoning/MapServer"),
        ])
        .with_title("Zoning"),
    ]
}

/// Record source that reads newline-delimited DCAT JSON from a reader.
///
/// Stands in for the upstream feed parser; counts closes so tests can check
/// that the adaptor releases it exactly once.
pub struct JsonLinesSource<R> {
    reader: Option<R>,
    line: String,
    records_read: usize,
    closes: Rc<Cell<usize>>,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        JsonLinesSource {
            reader: Some(reader),
            line: String::new(),
            records_read: 0,
            closes: Rc::new(Cell::new(0)),
        }
    }

    /// Shared counter of `close` calls.
    pub fn close_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.closes)
    }
}

impl<R: BufRead> RecordSource for JsonLinesSource<R> {
    type Record = DcatRecord;

    fn read_record(&mut self) -> Result<Option<DcatRecord>> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        loop {
            self.line.clear();
            if reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            if self.line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(&self.line).map_err(HarvestError::upstream)?;
            self.records_read += 1;
            return Ok(Some(record));
        }
    }

    fn close(&mut self) -> Result<()> {
        self.closes.set(self.closes.get() + 1);
        self.reader = None;
        Ok(())
    }

    fn records_read(&self) -> Option<usize> {
        Some(self.records_read)
    }
}

/// Reader that yields `data` and then fails with an I/O error.
pub struct FailingReader {
    data: std::io::Cursor<Vec<u8>>,
}

impl FailingReader {
    pub fn new(data: &str) -> Self {
        FailingReader {
            data: std::io::Cursor::new(data.as_bytes().to_vec()),
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.data.read(buf)?;
        if n == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "feed connection reset",
            ));
        }
        Ok(n)
    }
}
