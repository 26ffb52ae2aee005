//! Parquet snapshot of a loaded graph
//!
//! Based on `DuckDB` (Raasveldt et al., SIGMOD 2019) columnar storage patterns.
//! A snapshot is an alternative *source* for the same immutable graph: it loads faster
//! than re-parsing a large text edge list. Analytical results are never written here.
//!
//! # Format
//!
//! A snapshot is two Parquet files:
//! - `{path}_edges.parquet`: (source, target), each undirected edge once with source < target
//! - `{path}_nodes.parquet`: (`node_id`), every node including isolated ones

use super::{GraphBuilder, NodeId, SocialGraph};
use anyhow::{Context, Result};
use arrow::array::UInt64Array;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Path of the edges file for a snapshot base path
#[must_use]
pub fn edges_path(base_path: &Path) -> PathBuf {
    PathBuf::from(format!("{}_edges.parquet", base_path.display()))
}

/// Path of the nodes file for a snapshot base path
#[must_use]
pub fn nodes_path(base_path: &Path) -> PathBuf {
    PathBuf::from(format!("{}_nodes.parquet", base_path.display()))
}

impl SocialGraph {
    /// Write graph to a Parquet snapshot
    ///
    /// # Errors
    ///
    /// Returns error if file I/O fails or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn write_parquet<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let base_path = path.as_ref();

        let mut sources = Vec::with_capacity(self.num_edges());
        let mut targets = Vec::with_capacity(self.num_edges());
        for (u, v) in self.edges() {
            sources.push(self.node_id(u).0);
            targets.push(self.node_id(v).0);
        }
        write_columns(
            &edges_path(base_path),
            vec![("source", sources), ("target", targets)],
        )?;

        let node_ids = self.node_ids().iter().map(|id| id.0).collect();
        write_columns(&nodes_path(base_path), vec![("node_id", node_ids)])?;

        Ok(())
    }

    /// Read graph from a Parquet snapshot
    ///
    /// # Errors
    ///
    /// Returns error if files don't exist or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn read_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref();
        let mut builder = GraphBuilder::new();

        for batch in read_batches(&nodes_path(base_path))? {
            let node_ids = u64_column(&batch, 0, "node_id")?;
            for i in 0..batch.num_rows() {
                builder.add_node(NodeId(node_ids.value(i)));
            }
        }

        for batch in read_batches(&edges_path(base_path))? {
            let sources = u64_column(&batch, 0, "source")?;
            let targets = u64_column(&batch, 1, "target")?;
            for i in 0..batch.num_rows() {
                builder.add_edge(NodeId(sources.value(i)), NodeId(targets.value(i)));
            }
        }

        Ok(builder.build())
    }
}

fn write_columns(path: &Path, columns: Vec<(&str, Vec<u64>)>) -> Result<()> {
    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::UInt64, false))
            .collect::<Vec<_>>(),
    ));

    let arrays = columns
        .into_iter()
        .map(|(_, values)| Arc::new(UInt64Array::from(values)) as arrow::array::ArrayRef)
        .collect();

    let batch =
        RecordBatch::try_new(schema.clone(), arrays).context("Failed to create RecordBatch")?;

    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(
            parquet::basic::ZstdLevel::try_new(3)?,
        ))
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

fn read_batches(path: &Path) -> Result<Vec<RecordBatch>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    reader
        .map(|batch| batch.context("Failed to decode record batch"))
        .collect()
}

fn u64_column<'a>(batch: &'a RecordBatch, idx: usize, name: &str) -> Result<&'a UInt64Array> {
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<UInt64Array>()
        .with_context(|| format!("Invalid {name} column type"))
}
