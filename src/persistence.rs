// File: src/persistence.rs
//! File boundary: word lists, JSON graphs, binary snapshots and reports.
//! Every write goes to a temp file in the target directory first and is then
//! renamed over the destination.

use crate::codec::{decode, encode, SerializedGraph};
use crate::core::graph::WordGraph;
use crate::core::vocabulary::Vocabulary;
use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Directory, next to the analysed file, that receives reports.
pub const REPORTS_DIR: &str = "reports";

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent = parent_dir(path);
    fs::create_dir_all(parent)?;

    let temp_file = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush()?;
    }
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let text = fs::read_to_string(path)?;
    let vocab = Vocabulary::from_lines(&text)?;
    tracing::debug!(path = %path.display(), words = vocab.len(), "loaded word list");
    Ok(vocab)
}

pub fn save_vocabulary(path: &Path, vocab: &Vocabulary) -> Result<()> {
    write_atomically(path, |w| Ok(w.write_all(vocab.to_lines().as_bytes())?))?;
    tracing::debug!(path = %path.display(), words = vocab.len(), "saved word list");
    Ok(())
}

/// Reads a JSON graph and decodes it.
pub fn load_graph(path: &Path) -> Result<WordGraph> {
    let reader = BufReader::new(File::open(path)?);
    let serialized: SerializedGraph = serde_json::from_reader(reader)?;
    let graph = decode(&serialized)?;
    tracing::debug!(path = %path.display(), words = graph.len(), "loaded graph");
    Ok(graph)
}

/// Encodes a graph and writes it as compact JSON.
pub fn save_graph(path: &Path, graph: &WordGraph) -> Result<()> {
    let serialized = encode(graph);
    write_atomically(path, |w| Ok(serde_json::to_writer(w, &serialized)?))?;
    tracing::info!(path = %path.display(), words = graph.len(), "saved graph");
    Ok(())
}

/// Writes the decoded graph in binary form for fast reloading.
pub fn save_snapshot(path: &Path, graph: &WordGraph) -> Result<()> {
    write_atomically(path, |w| Ok(bincode::serialize_into(w, graph)?))?;
    tracing::info!(path = %path.display(), words = graph.len(), "saved snapshot");
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<WordGraph> {
    let reader = BufReader::new(File::open(path)?);
    let graph: WordGraph = bincode::deserialize_from(reader)?;
    let graph = graph.validated()?;
    tracing::debug!(path = %path.display(), words = graph.len(), "loaded snapshot");
    Ok(graph)
}

/// `<dir of input>/reports/<input stem>.connectivity.txt`
pub fn report_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "graph".to_string());
    parent_dir(input)
        .join(REPORTS_DIR)
        .join(format!("{stem}.connectivity.txt"))
}

/// Writes `report` next to `input` and returns where it went.
pub fn write_report(input: &Path, report: &str) -> Result<PathBuf> {
    let path = report_path(input);
    write_atomically(&path, |w| Ok(w.write_all(report.as_bytes())?))?;
    tracing::info!(path = %path.display(), "wrote connectivity report");
    Ok(path)
}

/// Copies `path` to `<path>.bak`, replacing an older backup.
pub fn backup(path: &Path) -> Result<PathBuf> {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    let backup = PathBuf::from(name);
    fs::copy(path, &backup)?;
    tracing::debug!(from = %path.display(), to = %backup.display(), "backed up");
    Ok(backup)
}
