/// Binary min-heap ordered by a caller-supplied score.
///
/// Scores are computed once on `push` and cached next to the item. Among
/// equal scores the pop order is unspecified, but identical push sequences
/// always pop identically.
pub struct MinHeap<T, F>
where
    F: Fn(&T) -> u32,
{
    heap: Vec<(u32, T)>,
    score: F,
}

impl<T, F> MinHeap<T, F>
where
    F: Fn(&T) -> u32,
{
    pub fn new(score: F) -> Self {
        Self {
            heap: Vec::new(),
            score,
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn push(&mut self, item: T) {
        let score = (self.score)(&item);
        self.heap.push((score, item));
        self.bubble_up(self.heap.len() - 1);
    }

    /// Removes the lowest-scored item.
    pub fn pop(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let (_, top) = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sink_down(0);
        }
        Some(top)
    }

    fn bubble_up(&mut self, mut n: usize) {
        while n > 0 {
            let parent = (n - 1) / 2;
            if self.heap[n].0 >= self.heap[parent].0 {
                break;
            }
            self.heap.swap(n, parent);
            n = parent;
        }
    }

    fn sink_down(&mut self, mut n: usize) {
        let length = self.heap.len();
        loop {
            let left = 2 * n + 1;
            let right = left + 1;
            let mut smallest = n;

            if left < length && self.heap[left].0 < self.heap[smallest].0 {
                smallest = left;
            }
            if right < length && self.heap[right].0 < self.heap[smallest].0 {
                smallest = right;
            }
            if smallest == n {
                break;
            }
            self.heap.swap(n, smallest);
            n = smallest;
        }
    }
}
