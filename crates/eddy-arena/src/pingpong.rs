//! A current/previous buffer pair with generation-based role swap.
//!
//! [`FieldPair`] owns exactly two equally sized buffers. The buffer at
//! `generation & 1` is current; the other is previous. [`FieldPair::swap`]
//! bumps the generation, which exchanges the roles without moving data.

/// Two fixed-size buffers for one field, rotated by generation.
#[derive(Clone, Debug)]
pub struct FieldPair {
    buffers: [Vec<f32>; 2],
    generation: u32,
}

impl FieldPair {
    /// Allocate a zero-filled pair of `len` elements per buffer.
    pub fn new(len: usize) -> Self {
        Self {
            buffers: [vec![0.0; len], vec![0.0; len]],
            generation: 0,
        }
    }

    /// Number of elements in each buffer.
    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    /// Whether the buffers are empty. Never true for grid-backed pairs.
    pub fn is_empty(&self) -> bool {
        self.buffers[0].is_empty()
    }

    /// Number of swaps performed since construction (wrapping).
    pub fn generation(&self) -> u32 {
        self.generation
    }

    fn front(&self) -> usize {
        (self.generation & 1) as usize
    }

    /// The current buffer.
    pub fn current(&self) -> &[f32] {
        &self.buffers[self.front()]
    }

    /// The previous buffer.
    pub fn previous(&self) -> &[f32] {
        &self.buffers[self.front() ^ 1]
    }

    /// Mutable access to the current buffer.
    pub fn current_mut(&mut self) -> &mut [f32] {
        let front = self.front();
        &mut self.buffers[front]
    }

    /// Mutable access to the previous buffer.
    pub fn previous_mut(&mut self) -> &mut [f32] {
        let back = self.front() ^ 1;
        &mut self.buffers[back]
    }

    /// Both buffers at once as `(current, previous)`.
    pub fn split_mut(&mut self) -> (&mut [f32], &mut [f32]) {
        let front = self.front();
        let [a, b] = &mut self.buffers;
        if front == 0 {
            (a.as_mut_slice(), b.as_mut_slice())
        } else {
            (b.as_mut_slice(), a.as_mut_slice())
        }
    }

    /// Exchange the current and previous roles.
    pub fn swap(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Zero both buffers. The generation is left as is.
    pub fn clear(&mut self) {
        for buf in &mut self.buffers {
            buf.fill(0.0);
        }
    }

    /// Index of the first non-finite element in either buffer.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.current()
            .iter()
            .chain(self.previous())
            .position(|v| !v.is_finite())
            .map(|pos| pos % self.len())
    }

    /// Bytes held by both buffers.
    pub fn memory_bytes(&self) -> usize {
        2 * self.len() * std::mem::size_of::<f32>()
    }
}
