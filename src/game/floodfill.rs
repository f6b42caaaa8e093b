use std::collections::VecDeque;

use super::{Board, Walls, CELLS, SENTINEL};

impl Board {
    /// Returns if both agents are still connected by free cells.
    ///
    /// Breadth first search from the searching agent. The opponent's cell is
    /// traversable, so this checks connectivity and not move legality.
    pub fn can_reach(&self) -> bool {
        let target = self.opponent();
        let start = self.you();

        let mut visited = [false; CELLS + 1];
        visited[SENTINEL] = true;

        let mut queue = VecDeque::with_capacity(CELLS);
        queue.push_back(start);
        while let Some(p) = queue.pop_front() {
            if visited[p] {
                continue;
            }
            if p == target {
                return true;
            }
            visited[p] = true;
            queue.extend(
                self.moves(p, Walls::REACH)
                    .map(|(_, next)| next)
                    .filter(|&next| !visited[next]),
            );
        }
        false
    }
}
