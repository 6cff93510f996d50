// JSON-backed task store: CRUD, queries, CSV interchange

use crate::error::StoreError;
use crate::models::{Priority, Status, Task};
use rand::Rng;
use std::cmp::Reverse;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Header row of the CSV interchange format.
pub const CSV_HEADER: &str = "ID,Name,Priority,Due Date,Status";

/// Band for freshly generated ids. Large enough that retry-until-unique
/// terminates quickly at any realistic collection size.
const ID_RANGE: Range<u32> = 1000..100_000_000;

/// Owner of the task collection and its backing file.
///
/// Single-threaded and synchronous: every mutating operation rewrites the
/// whole JSON file before returning. Callers sharing a store across threads
/// must wrap it in their own mutual exclusion.
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Open a store backed by the given file.
    ///
    /// A missing file yields an empty store. A file that exists but cannot
    /// be read or parsed also yields an empty store, with a warning: the
    /// store never refuses to start over a bad file.
    pub fn open<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let tasks = Self::load(&path);
        debug!(path = ?path, count = tasks.len(), "opened task store");
        Self { path, tasks }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Vec<Task> {
        if !path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                warn!(path = ?path, error = ?e, "failed to read task file, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(path = ?path, error = ?e, "task file is malformed, starting empty");
                Vec::new()
            }
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.tasks)
            .map_err(|e| StoreError::Io(e.into()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn fresh_id(&self) -> u32 {
        let mut rng = rand::rng();
        loop {
            let id = rng.random_range(ID_RANGE);
            if !self.tasks.iter().any(|t| t.id == id) {
                return id;
            }
        }
    }

    fn parse_fields(
        name: &str,
        priority: &str,
        due_date: &str,
    ) -> Result<Priority, StoreError> {
        if name.trim().is_empty() || priority.trim().is_empty() || due_date.trim().is_empty() {
            return Err(StoreError::MissingFields);
        }
        priority.parse().map_err(|_| StoreError::InvalidPriority)
    }

    /// Add a new task. Status is always `Todo`; the id is assigned here and
    /// never reused while the task lives.
    pub fn add(&mut self, name: &str, priority: &str, due_date: &str) -> Result<Task, StoreError> {
        let priority = Self::parse_fields(name, priority, due_date)?;

        let task = Task {
            id: self.fresh_id(),
            name: name.to_string(),
            priority,
            due_date: due_date.to_string(),
            status: Status::Todo,
        };
        self.tasks.push(task.clone());
        self.save()?;

        debug!(id = task.id, name = %task.name, "added task");
        Ok(task)
    }

    /// Snapshot of all tasks, or only those with the given status.
    ///
    /// Sorted by priority descending, then due date ascending; an
    /// unparseable due date sorts last. The returned tasks are clones.
    pub fn get(&self, status: Option<Status>) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();

        tasks.sort_by_key(|t| (Reverse(t.priority.rank()), t.due_date_key()));
        tasks
    }

    pub fn get_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Overwrite name, priority, and due date. Status and id are untouched.
    pub fn update_fields(
        &mut self,
        id: u32,
        name: &str,
        priority: &str,
        due_date: &str,
    ) -> Result<(), StoreError> {
        let priority = Self::parse_fields(name, priority, due_date)?;

        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;
        task.name = name.to_string();
        task.priority = priority;
        task.due_date = due_date.to_string();
        self.save()?;
        Ok(())
    }

    /// Move a task one step forward in the lifecycle. Advancing a
    /// `Completed` task is rejected rather than wrapping around.
    pub fn advance_status(&mut self, id: u32) -> Result<Status, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;
        let next = task.status.next().ok_or(StoreError::AtFinalStatus)?;
        task.status = next;
        self.save()?;

        debug!(id, status = %next, "advanced task");
        Ok(next)
    }

    /// Move a task one step back in the lifecycle.
    pub fn revert_status(&mut self, id: u32) -> Result<Status, StoreError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound)?;
        let prev = task.status.prev().ok_or(StoreError::AtInitialStatus)?;
        task.status = prev;
        self.save()?;

        debug!(id, status = %prev, "reverted task");
        Ok(prev)
    }

    /// Delete the task with the given id. Unknown ids are a silent no-op;
    /// the file is rewritten either way.
    pub fn remove(&mut self, id: u32) -> Result<(), StoreError> {
        self.tasks.retain(|t| t.id != id);
        self.save()
    }

    /// Search by id, name, or status label.
    ///
    /// The query splits on `/` into independent terms; a task matches when
    /// any term is a case-insensitive substring of its id, name, or status.
    /// A blank query matches nothing (unlike `get(None)`). Results keep
    /// store order, each task at most once.
    pub fn search(&self, query: &str) -> Vec<Task> {
        let terms: Vec<String> = query
            .split('/')
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        if terms.is_empty() {
            return Vec::new();
        }

        self.tasks
            .iter()
            .filter(|task| {
                let id = task.id.to_string();
                let name = task.name.to_lowercase();
                let status = task.status.as_str().to_lowercase();
                terms
                    .iter()
                    .any(|term| id.contains(term) || name.contains(term) || status.contains(term))
            })
            .cloned()
            .collect()
    }

    /// Write all tasks to a CSV file and return its resolved path.
    ///
    /// Commas inside task names become semicolons so a naive comma split
    /// stays aligned; no other escaping is applied, and the importer does
    /// not undo the substitution.
    pub fn export<P: AsRef<Path>>(&self, path: P) -> Result<PathBuf, StoreError> {
        let path = path.as_ref();

        let mut out = String::from(CSV_HEADER);
        out.push('\n');
        for task in &self.tasks {
            let safe_name = task.name.replace(',', ";");
            out.push_str(&format!(
                "{},{},{},{},{}\n",
                task.id, safe_name, task.priority, task.due_date, task.status
            ));
        }
        fs::write(path, out)?;

        let resolved = path.canonicalize()?;
        info!(path = ?resolved, count = self.tasks.len(), "exported tasks");
        Ok(resolved)
    }

    /// Read tasks from a CSV file, appending rows whose id is new.
    ///
    /// The first line is the header. Rows with the wrong field count, an
    /// unparseable id, an unrecognized priority or status, or an id already
    /// in the store are skipped with a warning. The file is persisted once
    /// after all rows; returns the number of tasks imported. Fails only if
    /// the file cannot be opened or the final save fails.
    pub fn import<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;

        let mut imported = 0;
        for (idx, line) in content.lines().enumerate().skip(1) {
            let line_num = idx + 1;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 5 {
                warn!(line = line_num, "skipping row: expected 5 fields, got {}", fields.len());
                continue;
            }

            let id: u32 = match fields[0].trim().parse() {
                Ok(id) => id,
                Err(_) => {
                    warn!(line = line_num, id = fields[0], "skipping row: unparseable id");
                    continue;
                }
            };
            if self.tasks.iter().any(|t| t.id == id) {
                warn!(line = line_num, id, "skipping row: id already exists");
                continue;
            }

            let priority: Priority = match fields[2].parse() {
                Ok(p) => p,
                Err(_) => {
                    warn!(line = line_num, id, priority = fields[2], "skipping row: unrecognized priority");
                    continue;
                }
            };
            let status: Status = match fields[4].parse() {
                Ok(s) => s,
                Err(_) => {
                    warn!(line = line_num, id, status = fields[4], "skipping row: unrecognized status");
                    continue;
                }
            };

            self.tasks.push(Task {
                id,
                name: fields[1].to_string(),
                priority,
                due_date: fields[3].to_string(),
                status,
            });
            imported += 1;
        }

        self.save()?;
        info!(path = ?path, count = imported, "imported tasks");
        Ok(imported)
    }
}
