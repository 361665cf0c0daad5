use crate::config::StoreConfig;
use crate::date::parse_date;
use crate::error::{CorruptCause, Result, StoreError};
use crate::task::{Task, TaskRecord};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::Path,
};

/// Tasks in insertion order, mirrored to a JSON file after every change.
///
/// Positions handed in and out are 1-based and shift down when an earlier
/// task is removed.
#[derive(Debug)]
pub struct TaskStore {
    config: StoreConfig,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Loads the backing file, or starts empty when it does not exist yet.
    pub fn initialize(config: StoreConfig) -> Result<Self> {
        let tasks = load_tasks(config.path()).map_err(|cause| StoreError::CorruptStore {
            path: config.path.clone(),
            cause,
        })?;
        tracing::debug!(path = %config.path.display(), count = tasks.len(), "loaded tasks");
        Ok(Self { config, tasks })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// An empty `due_date` is treated the same as none.
    pub fn add(&mut self, description: String, due_date: Option<&str>, priority: i64) -> Result<()> {
        let due_date = match due_date {
            Some(text) if !text.is_empty() => {
                Some(parse_date(text).map_err(|_| StoreError::InvalidDate(text.to_string()))?)
            }
            _ => None,
        };

        self.tasks.push(Task::new(description, due_date, priority));
        tracing::info!(position = self.tasks.len(), "task added");
        self.persist()
    }

    pub fn list(&self) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, task)| (i + 1, task))
            .collect()
    }

    pub fn get(&self, position: usize) -> Option<&Task> {
        position.checked_sub(1).and_then(|i| self.tasks.get(i))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Completing an already-completed task succeeds and still persists.
    pub fn mark_complete(&mut self, position: usize) -> Result<()> {
        let index = self.index_of(position)?;
        self.tasks[index].completed = true;
        tracing::info!(position, "task marked complete");
        self.persist()
    }

    pub fn remove(&mut self, position: usize) -> Result<()> {
        let index = self.index_of(position)?;
        self.tasks.remove(index);
        tracing::info!(position, remaining = self.tasks.len(), "task removed");
        self.persist()
    }

    fn index_of(&self, position: usize) -> Result<usize> {
        if (1..=self.tasks.len()).contains(&position) {
            Ok(position - 1)
        } else {
            Err(StoreError::IndexOutOfRange {
                position,
                count: self.tasks.len(),
            })
        }
    }

    /// Rewrites the whole backing file. On failure the in-memory tasks are
    /// left as they are, ahead of what is on disk.
    fn persist(&self) -> Result<()> {
        let path = self.config.path();
        if let Err(source) = save_tasks(path, &self.tasks) {
            tracing::warn!(path = %path.display(), error = %source, "failed to save tasks");
            return Err(StoreError::PersistFailure {
                path: path.to_path_buf(),
                source,
            });
        }
        tracing::debug!(path = %path.display(), count = self.tasks.len(), "saved tasks");
        Ok(())
    }
}

fn load_tasks(path: &Path) -> std::result::Result<Vec<Task>, CorruptCause> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(CorruptCause::Read(err)),
    };

    let values: Vec<serde_json::Value> =
        serde_json::from_str(&data).map_err(CorruptCause::Syntax)?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            TaskRecord::from_value(value)
                .and_then(Task::from_record)
                .map_err(|source| CorruptCause::Record { index, source })
        })
        .collect()
}

fn save_tasks(path: &Path, tasks: &[Task]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let records: Vec<TaskRecord> = tasks.iter().map(Task::to_record).collect();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.flush()
}
