use crate::summary::core::{ProfileKind, SummaryProfile};
use crate::summary::AggregateResult;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::io::Write;

/// One output value. Serialized as a plain JSON scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(u64),
    Float(f64),
}

impl Cell {
    /// Text for CSV output. Whole floats keep one decimal (`3.0`), others use
    /// the shortest exact representation.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Int(value) => value.to_string(),
            Cell::Float(value) if value.is_finite() && value.fract() == 0.0 => {
                format!("{:.1}", value)
            }
            Cell::Float(value) => value.to_string(),
        }
    }
}

///
/// Result rows under a fixed, variant-specific column order.
///
/// # Fields
///
/// * `kind` (`ProfileKind`) - Which variant's columns the rows follow.
/// * `columns` (`Vec<String>`) - Header names: the leading summary columns,
///   then one per bucket, then `whales` for the length variant.
/// * `rows` (`Vec<Vec<Cell>>`) - One entry per pushed result, always
///   `columns.len()` cells long.
///
/// Serialized through [`RowView`] so JSON objects keep the column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    kind: ProfileKind,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    pub fn new(profile: &SummaryProfile) -> Self {
        let kind = profile.kind();
        let buckets = profile.buckets().iter().map(|def| def.label.clone());

        let columns = match kind {
            ProfileKind::Reads => ["Sample", "total_Gbp", "N50", "total_reads_M"]
                .iter()
                .map(|c| c.to_string())
                .chain(buckets)
                .collect(),
            ProfileKind::Coverage { .. } => ["File", "flowcell_id", "read_N50", "Gb", "coverage"]
                .iter()
                .map(|c| c.to_string())
                .chain(buckets)
                .chain(std::iter::once("whales".to_string()))
                .collect(),
        };

        Self {
            kind,
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Add `result` as a row shown under `label`.
    pub fn push(&mut self, result: &AggregateResult, label: &str) {
        let buckets = result.buckets.iter().map(|(_, value)| Cell::Float(*value));

        let row: Vec<Cell> = match self.kind {
            ProfileKind::Reads => vec![
                Cell::Text(label.to_string()),
                Cell::Float(result.total_gbp),
                Cell::Int(result.n50),
                Cell::Float(result.total_reads_millions.unwrap_or_default()),
            ]
            .into_iter()
            .chain(buckets)
            .collect(),
            ProfileKind::Coverage { .. } => vec![
                Cell::Text(label.to_string()),
                Cell::Text(result.identifiers.join(",")),
                Cell::Int(result.n50),
                Cell::Float(result.total_gbp),
                Cell::Float(result.coverage.unwrap_or_default()),
            ]
            .into_iter()
            .chain(buckets)
            .chain(std::iter::once(Cell::Int(result.long_reads.unwrap_or_default())))
            .collect(),
        };

        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Rows as maps keyed by column name, in column order.
    pub fn records(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(move |cells| RowView {
            columns: &self.columns,
            cells,
        })
    }

    pub fn write_csv<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "{}", csv_line(self.columns.iter().cloned()))?;
        for row in &self.rows {
            writeln!(writer, "{}", csv_line(row.iter().map(Cell::render)))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    columns: &'a [String],
    cells: &'a [Cell],
}

impl Serialize for RowView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

fn csv_field(field: String) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field
    }
}

fn csv_line(fields: impl Iterator<Item = String>) -> String {
    fields.map(csv_field).collect::<Vec<_>>().join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coverage_result() -> AggregateResult {
        AggregateResult {
            label: "runA/s1/a.txt".to_string(),
            identifiers: vec!["PAW1".to_string(), "PAW2".to_string()],
            total_reads: 10,
            total_bases: 2_500_000_000,
            total_gbp: 2.5,
            n50: 31_000,
            total_reads_millions: None,
            coverage: Some(0.81),
            buckets: vec![
                ("20kb+".to_string(), 0.5),
                ("40kb+".to_string(), 0.2),
                ("60kb+".to_string(), 0.1),
                ("80kb+".to_string(), 0.0),
                ("100kb+".to_string(), 0.0),
            ],
            long_reads: Some(0),
        }
    }

    #[test]
    fn float_rendering() {
        assert_eq!(Cell::Float(0.0).render(), "0.0");
        assert_eq!(Cell::Float(3.0).render(), "3.0");
        assert_eq!(Cell::Float(1.27).render(), "1.27");
        assert_eq!(Cell::Float(0.1).render(), "0.1");
        assert_eq!(Cell::Int(42).render(), "42");
    }

    #[test]
    fn coverage_csv_has_fixed_columns_and_quotes_ids() {
        let mut table = ReportTable::new(&SummaryProfile::coverage(3.1).unwrap());
        table.push(&coverage_result(), "s1_fast");

        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "File,flowcell_id,read_N50,Gb,coverage,20kb+,40kb+,60kb+,80kb+,100kb+,whales\n\
             s1_fast,\"PAW1,PAW2\",31000,2.5,0.81,0.5,0.2,0.1,0.0,0.0,0\n"
        );
    }

    #[test]
    fn reads_columns() {
        let table = ReportTable::new(&SummaryProfile::reads());
        assert_eq!(
            table.columns().join(","),
            "Sample,total_Gbp,N50,total_reads_M,q5_reads_M,q10_reads_M,q15_reads_M,q20_reads_M,q25_reads_M"
        );
        assert!(table.is_empty());
    }

    #[test]
    fn json_rows_keep_column_order() {
        let mut table = ReportTable::new(&SummaryProfile::coverage(3.1).unwrap());
        table.push(&coverage_result(), "s1");
        let json = serde_json::to_string(&table.records().next().unwrap()).unwrap();
        assert!(json.starts_with("{\"File\":\"s1\",\"flowcell_id\":\"PAW1,PAW2\",\"read_N50\":31000,"));
        assert!(json.ends_with("\"whales\":0}"));
    }
}
