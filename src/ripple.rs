//! Ripple propagation over the key adjacency graph
//!
//! Each key press grabs one tree from a fixed pool. A tree stores the
//! breadth-first layering of the graph around the pressed key: frame 0 is the
//! key itself, frame `n` the keys first reached in `n` hops. Trees walk
//! outward one frame every `pacing` ticks and are freed once they run out of
//! frames. When the pool is full, new presses are dropped; running ripples
//! are never evicted.

use heapless::Vec;

use crate::config::defaults::{RIPPLE_MAX_FRAMES, RIPPLE_TREES};
use crate::error::{Result, UnderglowError};
use crate::layout::Layout;

/// Index of a tree in the ripple pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RippleHandle(usize);

impl RippleHandle {
    pub const fn index(self) -> usize {
        self.0
    }
}

type Frame<const KEYS: usize> = Vec<u16, KEYS>;

#[derive(Debug, Clone)]
struct RippleTree<const KEYS: usize> {
    frames: Vec<Frame<KEYS>, RIPPLE_MAX_FRAMES>,
    /// Current frame, `None` while the slot is free
    frame: Option<usize>,
    /// Origin key while it is still held down
    held: Option<usize>,
    /// Ticks spent on the current frame
    pacing: u8,
}

impl<const KEYS: usize> RippleTree<KEYS> {
    const fn new() -> Self {
        Self {
            frames: Vec::new(),
            frame: None,
            held: None,
            pacing: 0,
        }
    }

    fn free(&mut self) {
        self.frames.clear();
        self.frame = None;
        self.held = None;
        self.pacing = 0;
    }
}

/// What a live tree wants drawn this tick.
#[derive(Debug, Clone, Copy)]
pub struct RippleView<'r> {
    /// Origin key, if it is still held
    pub held: Option<usize>,
    /// Index of the current frame (0 = origin)
    pub frame: usize,
    /// Keys on the current frame
    pub keys: &'r [u16],
}

/// Fixed pool of concurrently animating ripples.
#[derive(Debug, Clone)]
pub struct RippleEngine<const KEYS: usize> {
    trees: [RippleTree<KEYS>; RIPPLE_TREES],
}

impl<const KEYS: usize> Default for RippleEngine<KEYS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const KEYS: usize> RippleEngine<KEYS> {
    pub fn new() -> Self {
        Self {
            trees: core::array::from_fn(|_| RippleTree::new()),
        }
    }

    /// Free every tree.
    pub fn clear(&mut self) {
        for tree in &mut self.trees {
            tree.free();
        }
    }

    /// Start a ripple at `origin`
    ///
    /// Takes the first free tree and lays out the frames. Returns
    /// [`UnderglowError::ResourceExhausted`] when every tree is busy; the
    /// running trees are left untouched.
    pub fn begin(&mut self, layout: &Layout<'_>, origin: usize) -> Result<RippleHandle> {
        if origin >= KEYS.min(layout.key_count()) {
            return Err(UnderglowError::InvalidArgument("ripple origin out of range"));
        }
        let origin_key = u16::try_from(origin)
            .map_err(|_| UnderglowError::InvalidArgument("ripple origin out of range"))?;
        let index = self
            .trees
            .iter()
            .position(|tree| tree.frame.is_none())
            .ok_or(UnderglowError::ResourceExhausted)?;

        let tree = &mut self.trees[index];
        lay_out_frames(layout, origin_key, &mut tree.frames);
        tree.frame = Some(0);
        tree.held = Some(origin);
        tree.pacing = 0;

        log::debug!("ripple {index} started at key {origin}");
        Ok(RippleHandle(index))
    }

    /// Free every tree whose held key is `origin`, whatever frame it is on.
    ///
    /// Returns how many trees were freed.
    pub fn release(&mut self, origin: usize) -> usize {
        let mut freed = 0;
        for tree in &mut self.trees {
            if tree.held == Some(origin) {
                tree.free();
                freed += 1;
            }
        }
        freed
    }

    /// Move every live tree along by one tick.
    ///
    /// A tree steps to its next frame after `pacing` ticks and is freed once
    /// it steps past the last frame.
    pub fn advance(&mut self, pacing: u8) {
        let pacing = pacing.max(1);
        for tree in &mut self.trees {
            let Some(frame) = tree.frame else {
                continue;
            };
            tree.pacing = tree.pacing.saturating_add(1);
            if tree.pacing < pacing {
                continue;
            }
            tree.pacing = 0;
            let next = frame + 1;
            if next >= RIPPLE_MAX_FRAMES {
                tree.free();
            } else {
                tree.frame = Some(next);
            }
        }
    }

    /// Live trees and what they show this tick.
    pub fn views(&self) -> impl Iterator<Item = RippleView<'_>> {
        self.trees.iter().filter_map(|tree| {
            let frame = tree.frame?;
            Some(RippleView {
                held: tree.held,
                frame,
                keys: tree.frames.get(frame).map_or(&[][..], |keys| keys.as_slice()),
            })
        })
    }

    /// Number of live trees.
    pub fn active(&self) -> usize {
        self.trees.iter().filter(|tree| tree.frame.is_some()).count()
    }

    /// Current frame of a tree, `None` if it is free.
    pub fn frame_index(&self, handle: RippleHandle) -> Option<usize> {
        self.trees.get(handle.0).and_then(|tree| tree.frame)
    }

    /// Keys of frame `frame` in a tree's layering.
    pub fn frame_keys(&self, handle: RippleHandle, frame: usize) -> Option<&[u16]> {
        let tree = self.trees.get(handle.0)?;
        tree.frame?;
        tree.frames.get(frame).map(Vec::as_slice)
    }

    /// Number of frames laid out for a tree (0 if free).
    pub fn frame_count(&self, handle: RippleHandle) -> usize {
        self.trees
            .get(handle.0)
            .filter(|tree| tree.frame.is_some())
            .map_or(0, |tree| tree.frames.len())
    }
}

/// Breadth-first layering from `origin`, at most [`RIPPLE_MAX_FRAMES`] deep.
///
/// Each key shows up in at most one frame. Neighbors keep the order of the
/// adjacency table. Keys outside `KEYS` are skipped.
fn lay_out_frames<const KEYS: usize>(
    layout: &Layout<'_>,
    origin: u16,
    frames: &mut Vec<Frame<KEYS>, RIPPLE_MAX_FRAMES>,
) {
    frames.clear();
    let mut visited = [false; KEYS];
    visited[usize::from(origin)] = true;

    let mut first = Frame::<KEYS>::new();
    let _ = first.push(origin);
    if frames.push(first).is_err() {
        return;
    }

    while frames.len() < RIPPLE_MAX_FRAMES {
        let mut next = Frame::<KEYS>::new();
        if let Some(last) = frames.last() {
            for &key in last {
                for &neighbor in layout.neighbors(usize::from(key)) {
                    let Some(seen) = visited.get_mut(usize::from(neighbor)) else {
                        continue;
                    };
                    if *seen {
                        continue;
                    }
                    *seen = true;
                    // Cannot overflow: every key is pushed at most once.
                    let _ = next.push(u16::from(neighbor));
                }
            }
        }
        if next.is_empty() || frames.push(next).is_err() {
            break;
        }
    }
}
