use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, PoisonError, RwLock};

use super::aggregate::{aggregate, CrossTab, GroupColumn};
use super::duration::{normalize_durations, NormalizedDurations};
use super::error::ValidationError;
use super::model::{ContentTable, TableId, TableView};
use super::select::{row_count_for, select, ColumnSelection};

// ---------------------------------------------------------------------------
// Memo – read-through cache bound to one table identity
// ---------------------------------------------------------------------------

/// Read-through cache of pure results keyed by `(table identity, params)`.
///
/// No eviction: the working set is one table's worth of parameter
/// combinations. Seeing a new table identity drops every entry. Concurrent
/// readers never observe a partial write; on a race the last writer wins,
/// which is harmless because both computed the same value.
#[derive(Debug)]
pub struct Memo<K, V> {
    inner: RwLock<MemoInner<K, V>>,
}

#[derive(Debug)]
struct MemoInner<K, V> {
    table: Option<TableId>,
    entries: HashMap<(TableId, K), Arc<V>>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo {
            inner: RwLock::new(MemoInner {
                table: None,
                entries: HashMap::new(),
            }),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Memo<K, V> {
    pub fn get(&self, table: TableId, key: &K) -> Option<Arc<V>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.entries.get(&(table, key.clone())).cloned()
    }

    /// Return the cached value for `(table, key)`, computing it with `f` on a
    /// miss. Errors are returned and not cached.
    pub fn get_or_try_insert_with<E>(
        &self,
        table: TableId,
        key: K,
        f: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        if let Some(hit) = self.get(table, &key) {
            return Ok(hit);
        }

        let value = Arc::new(f()?);

        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.table != Some(table) {
            if let Some(previous) = inner.table {
                log::debug!("Cache rebinding from {previous} to {table}; dropping {} entries", inner.entries.len());
            }
            inner.entries.clear();
            inner.table = Some(table);
        }
        inner.entries.insert((table, key), Arc::clone(&value));
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// CachedQueries – memoized select / aggregate / normalize
// ---------------------------------------------------------------------------

/// Memoizing wrapper around the pure table operations. One instance is
/// shared by every page of the application.
#[derive(Debug, Default)]
pub struct CachedQueries {
    selections: Memo<(usize, ColumnSelection), TableView>,
    pivots: Memo<GroupColumn, CrossTab>,
    durations: Memo<(), NormalizedDurations>,
}

impl CachedQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Memoized [`select`]. Limits that clamp to the same row count share an
    /// entry.
    pub fn select(
        &self,
        table: &ContentTable,
        row_limit: usize,
        columns: &ColumnSelection,
    ) -> Result<Arc<TableView>, ValidationError> {
        let effective = row_count_for(table.len(), row_limit);
        self.selections
            .get_or_try_insert_with(table.id(), (effective, columns.clone()), || {
                select(table, row_limit, columns)
            })
    }

    /// Memoized [`aggregate`].
    pub fn aggregate(&self, table: &ContentTable, group_column: &str) -> Result<Arc<CrossTab>, ValidationError> {
        let group: GroupColumn = group_column.parse()?;
        self.pivots
            .get_or_try_insert_with(table.id(), group, || aggregate(table, group.name()))
    }

    /// Memoized [`normalize_durations`].
    pub fn durations(&self, table: &ContentTable) -> Arc<NormalizedDurations> {
        let result: Result<_, std::convert::Infallible> = self
            .durations
            .get_or_try_insert_with(table.id(), (), || Ok(normalize_durations(table)));
        match result {
            Ok(durations) => durations,
            Err(never) => match never {},
        }
    }
}
