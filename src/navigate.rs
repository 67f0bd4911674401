// MViewer -- Interactive image viewing engine built with Rust, glib and cairo
//
// Copyright (c) 2024-2025 Martin van der Werff <github (at) newinnovations.nl>
//
// This file is part of MViewer.
//
// MViewer is free software: you can redistribute it and/or modify it under the terms of
// the GNU Affero General Public License as published by the Free Software Foundation, either
// version 3 of the License, or (at your option) any later version.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR
// IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND
// FITNESS FOR A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
// LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; LOSS OF USE, DATA, OR PROFITS; OR
// BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT,
// STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::collections::HashSet;

use rand::{rngs::StdRng, seq::IteratorRandom, SeedableRng};
use tracing::debug;

use crate::util::path_to_directory;

/// Where to go in the image list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    First,
    Last,
    PrevDir,
    NextDir,
    PrevFile,
    NextFile,
    Random,
    /// Drop the current entry and move on
    Skip,
}

impl Direction {
    /// Direction used to retry after a candidate failed to load.
    pub fn continuation(&self) -> Direction {
        match self {
            Direction::First => Direction::NextFile,
            Direction::Last => Direction::PrevFile,
            other => *other,
        }
    }
}

/// Ordered list of image sources addressed by stable indices.
///
/// Queries return `None` when there is no entry in the requested direction.
pub trait ImageList {
    /// Number of entries still in the list
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn source(&self, index: usize) -> Option<&str>;

    /// One based rank of `index` among the remaining entries
    fn ordinal(&self, index: usize) -> Option<usize>;

    fn first(&self) -> Option<usize>;
    fn last(&self) -> Option<usize>;
    fn next_file(&self, from: usize) -> Option<usize>;
    fn prev_file(&self, from: usize) -> Option<usize>;
    fn next_dir(&self, from: usize) -> Option<usize>;
    fn prev_dir(&self, from: usize) -> Option<usize>;

    /// Any entry other than `from` and not in `exclude`. Returns `from`
    /// itself only if it is the sole candidate.
    fn random_file(&mut self, from: usize, exclude: &HashSet<usize>) -> Option<usize>;

    /// Removes `index` and returns the entry that takes its place.
    fn skip(&mut self, index: usize) -> Option<usize>;
}

/// Single step from `from` in `direction`.
pub fn step(
    list: &mut dyn ImageList,
    direction: Direction,
    from: usize,
    tried: &HashSet<usize>,
) -> Option<usize> {
    match direction {
        Direction::First => list.first(),
        Direction::Last => list.last(),
        Direction::PrevDir => list.prev_dir(from),
        Direction::NextDir => list.next_dir(from),
        Direction::PrevFile => list.prev_file(from),
        Direction::NextFile => list.next_file(from),
        Direction::Random => list.random_file(from, tried),
        Direction::Skip => list.skip(from),
    }
}

/// Finds the nearest entry in `direction` from `from` that `open` accepts.
///
/// After a failed candidate the search continues with the continuation of
/// the direction. Entries in `tried` count as already attempted and no index
/// is tried twice, so a circular list in which no entry loads ends as
/// exhausted (`None`).
pub fn nearest_loadable<F>(
    list: &mut dyn ImageList,
    direction: Direction,
    from: usize,
    mut tried: HashSet<usize>,
    mut open: F,
) -> Option<usize>
where
    F: FnMut(usize, &str) -> bool,
{
    let mut direction = direction;
    let mut index = from;
    loop {
        index = step(list, direction, index, &tried)?;
        if !tried.insert(index) {
            debug!("navigation returned to entry {index}, giving up");
            return None;
        }
        let Some(source) = list.source(index).map(str::to_string) else {
            return None;
        };
        if open(index, &source) {
            return Some(index);
        }
        debug!("unable to open {source}, trying further");
        direction = direction.continuation();
    }
}

#[derive(Debug, Clone)]
struct Entry {
    source: String,
    directory: String,
    active: bool,
}

/// [`ImageList`] over source paths, grouped into directories by their parent path.
pub struct SourceList {
    entries: Vec<Entry>,
    wrap: bool,
    rng: StdRng,
}

impl SourceList {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_rng(sources, StdRng::from_os_rng())
    }

    /// Same as [`SourceList::new`] with a reproducible random sequence.
    pub fn with_seed<I, S>(sources: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_rng(sources, StdRng::seed_from_u64(seed))
    }

    fn with_rng<I, S>(sources: I, rng: StdRng) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = sources
            .into_iter()
            .map(|s| {
                let source = s.into();
                Entry {
                    directory: path_to_directory(&source),
                    source,
                    active: true,
                }
            })
            .collect();
        Self {
            entries,
            wrap: false,
            rng,
        }
    }

    /// Makes the list circular.
    pub fn wrapping(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    fn is_active(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|e| e.active)
    }

    fn directory(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.directory.as_str())
    }

    /// Active indices after `from`, followed by those before it if wrapping.
    fn forward(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        let len = self.entries.len();
        let after = (from.saturating_add(1)).min(len)..len;
        let before = if self.wrap { 0..from.min(len) } else { 0..0 };
        after.chain(before).filter(|&i| self.entries[i].active)
    }

    /// Active indices before `from` in reverse order, followed by those after it if wrapping.
    fn backward(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        let len = self.entries.len();
        let before = (0..from.min(len)).rev();
        let after = if self.wrap {
            (from.saturating_add(1)).min(len)..len
        } else {
            0..0
        };
        before.chain(after.rev()).filter(|&i| self.entries[i].active)
    }
}

impl ImageList for SourceList {
    fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.active).count()
    }

    fn source(&self, index: usize) -> Option<&str> {
        self.entries
            .get(index)
            .filter(|e| e.active)
            .map(|e| e.source.as_str())
    }

    fn ordinal(&self, index: usize) -> Option<usize> {
        if !self.is_active(index) {
            return None;
        }
        Some(self.entries[..index].iter().filter(|e| e.active).count() + 1)
    }

    fn first(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.active)
    }

    fn last(&self) -> Option<usize> {
        self.entries.iter().rposition(|e| e.active)
    }

    fn next_file(&self, from: usize) -> Option<usize> {
        self.forward(from).next()
    }

    fn prev_file(&self, from: usize) -> Option<usize> {
        self.backward(from).next()
    }

    fn next_dir(&self, from: usize) -> Option<usize> {
        let current = self.directory(from)?;
        self.forward(from)
            .find(|&i| self.entries[i].directory != current)
    }

    /// First entry of the closest directory before the current one.
    fn prev_dir(&self, from: usize) -> Option<usize> {
        let current = self.directory(from)?;
        let mut index = self
            .backward(from)
            .find(|&i| self.entries[i].directory != current)?;
        let target = self.entries[index].directory.as_str();
        while let Some(prev) = (0..index).rev().find(|&i| self.entries[i].active) {
            if self.entries[prev].directory != target {
                break;
            }
            index = prev;
        }
        Some(index)
    }

    fn random_file(&mut self, from: usize, exclude: &HashSet<usize>) -> Option<usize> {
        let candidates = (0..self.entries.len())
            .filter(|&i| i != from && self.entries[i].active && !exclude.contains(&i));
        match candidates.choose(&mut self.rng) {
            Some(index) => Some(index),
            None if self.is_active(from) && !exclude.contains(&from) => Some(from),
            None => None,
        }
    }

    /// Removes `index` and returns the next entry, or the previous one when
    /// there is nothing ahead.
    fn skip(&mut self, index: usize) -> Option<usize> {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.active = false;
        }
        self.forward(index)
            .next()
            .or_else(|| self.backward(index).next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photos() -> SourceList {
        SourceList::with_seed(
            [
                "/a/1.jpg", "/a/2.jpg", "/a/3.jpg", "/b/1.jpg", "/b/2.jpg", "/c/1.jpg",
            ],
            7,
        )
    }

    #[test]
    fn test_file_steps() {
        let list = photos();
        assert_eq!(list.len(), 6);
        assert_eq!(list.first(), Some(0));
        assert_eq!(list.last(), Some(5));
        assert_eq!(list.next_file(2), Some(3));
        assert_eq!(list.next_file(5), None);
        assert_eq!(list.prev_file(0), None);
        assert_eq!(list.prev_file(4), Some(3));
    }

    #[test]
    fn test_file_steps_wrapping() {
        let list = photos().wrapping(true);
        assert_eq!(list.next_file(5), Some(0));
        assert_eq!(list.prev_file(0), Some(5));
    }

    #[test]
    fn test_dir_steps() {
        let list = photos();
        assert_eq!(list.next_dir(0), Some(3));
        assert_eq!(list.next_dir(3), Some(5));
        assert_eq!(list.next_dir(5), None);
        assert_eq!(list.prev_dir(5), Some(3));
        assert_eq!(list.prev_dir(4), Some(0));
        assert_eq!(list.prev_dir(1), None);
        let list = photos().wrapping(true);
        assert_eq!(list.next_dir(5), Some(0));
        assert_eq!(list.prev_dir(1), Some(5));
    }

    #[test]
    fn test_skip_removes_entry() {
        let mut list = photos();
        assert_eq!(list.skip(1), Some(2));
        assert_eq!(list.len(), 5);
        assert_eq!(list.source(1), None);
        assert_eq!(list.next_file(0), Some(2));
        assert_eq!(list.ordinal(2), Some(2));
        // nothing ahead: fall back
        assert_eq!(list.skip(5), Some(4));
        assert_eq!(list.ordinal(4), Some(4));
    }

    #[test]
    fn test_skip_last_entry() {
        let mut list = SourceList::new(["/only.png"]);
        assert_eq!(list.skip(0), None);
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
    }

    #[test]
    fn test_random_never_current() {
        let mut list = photos();
        let none = HashSet::new();
        for _ in 0..50 {
            let index = list.random_file(2, &none).unwrap();
            assert_ne!(index, 2);
            assert!(index < 6);
        }
        let mut single = SourceList::new(["/only.png"]);
        assert_eq!(single.random_file(0, &none), Some(0));
    }

    #[test]
    fn test_random_respects_exclude() {
        let mut list = photos();
        let exclude: HashSet<usize> = [0, 1, 3, 4, 5].into_iter().collect();
        assert_eq!(list.random_file(0, &exclude), Some(2));
        let exclude: HashSet<usize> = (0..6).collect();
        assert_eq!(list.random_file(0, &exclude), None);
    }

    #[test]
    fn test_nearest_loadable_skips_failures() {
        let mut list = photos();
        let broken = [1usize, 2];
        let mut attempts = Vec::new();
        let found = nearest_loadable(&mut list, Direction::NextFile, 0, HashSet::new(), |index, _| {
            attempts.push(index);
            !broken.contains(&index)
        });
        assert_eq!(found, Some(3));
        assert_eq!(attempts, vec![1, 2, 3]);
    }

    #[test]
    fn test_nearest_loadable_first_goes_forward() {
        let mut list = photos();
        let mut attempts = Vec::new();
        let found = nearest_loadable(&mut list, Direction::First, 4, HashSet::new(), |index, _| {
            attempts.push(index);
            index >= 2
        });
        assert_eq!(found, Some(2));
        assert_eq!(attempts, vec![0, 1, 2]);
    }

    #[test]
    fn test_nearest_loadable_last_goes_backward() {
        let mut list = photos();
        let mut attempts = Vec::new();
        let found = nearest_loadable(&mut list, Direction::Last, 0, HashSet::new(), |index, _| {
            attempts.push(index);
            index <= 3
        });
        assert_eq!(found, Some(3));
        assert_eq!(attempts, vec![5, 4, 3]);
    }

    #[test]
    fn test_nearest_loadable_exhausted() {
        let mut list = SourceList::new(["/a.png", "/b.png"]);
        assert_eq!(nearest_loadable(&mut list, Direction::NextFile, 0, HashSet::new(), |_, _| false), None);
    }

    #[test]
    fn test_nearest_loadable_circular_all_broken() {
        let mut list = photos().wrapping(true);
        assert_eq!(nearest_loadable(&mut list, Direction::NextFile, 0, HashSet::new(), |_, _| false), None);
        let mut list = photos().wrapping(true);
        assert_eq!(nearest_loadable(&mut list, Direction::Random, 0, HashSet::new(), |_, _| false), None);
    }

    #[test]
    fn test_nearest_loadable_skip_drops_broken() {
        let mut list = photos();
        let found = nearest_loadable(&mut list, Direction::Skip, 0, HashSet::new(), |index, _| index != 1);
        assert_eq!(found, Some(2));
        assert_eq!(list.len(), 4);
        assert_eq!(list.first(), Some(2));
    }

    #[test]
    fn test_nearest_loadable_passes_source() {
        let mut list = photos();
        let mut seen = String::new();
        nearest_loadable(&mut list, Direction::NextDir, 0, HashSet::new(), |_, source| {
            seen = source.to_string();
            true
        });
        assert_eq!(seen, "/b/1.jpg");
    }

    #[test]
    fn test_nearest_loadable_skips_tried() {
        let mut list = SourceList::new(["/a.png", "/b.png", "/c.png"]).wrapping(true);
        let mut attempts = Vec::new();
        let found = nearest_loadable(
            &mut list,
            Direction::NextFile,
            1,
            [1].into_iter().collect(),
            |index, _| {
                attempts.push(index);
                false
            },
        );
        assert_eq!(found, None);
        assert_eq!(attempts, vec![2, 0]);
    }
}
