//! Monte Carlo Tree Search (MCTS) with UCB1 selection.
//!
//! Each search runs Selection → Expansion → Simulation → Backpropagation until
//! the budget runs out:
//! - Selection descends by UCB1 while a node is fully expanded
//! - Expansion turns one random untried move into a child node
//! - Simulation is a random playout from that child
//! - Backpropagation credits wins from the point of view of each node's parent
//!
//! Nodes live in an arena ([`Tree`]) and refer to their parent by index, so the
//! tree has a single owner and re-rooting for reuse is a compaction pass.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::board::{Board, Color, Move};
use crate::constants::{DEFAULT_KOMI, EXPLORATION_DECAY, N_SIMS};
use crate::movegen::legal_moves;
use crate::playout::mcplayout;

/// Index of a node in a [`Tree`].
pub type NodeId = usize;

/// Index of the root in every tree.
pub const ROOT: NodeId = 0;

/// A node in the MCTS search tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node, `None` for the root
    pub parent: Option<NodeId>,
    /// Expanded children, in expansion order
    pub children: Vec<NodeId>,
    /// Move that led here (a pass marker for a fresh root)
    pub mv: Move,
    /// Position after `mv`
    pub board: Board,
    /// Color that played `mv`
    pub color: Color,
    /// Number of visits
    pub visits: u32,
    /// Wins for the parent's mover; draws count half
    pub wins: f64,
    /// Legal moves of the next player not yet expanded
    pub untried: Vec<Move>,
}

impl Node {
    fn new(parent: Option<NodeId>, mv: Move, board: Board, color: Color) -> Self {
        let untried = legal_moves(&board, color.opponent());
        Self {
            parent,
            children: Vec::new(),
            mv,
            board,
            color,
            visits: 0,
            wins: 0.0,
            untried,
        }
    }

    /// Win rate for the parent's mover, or 0 before the first visit.
    #[inline]
    pub fn winrate(&self) -> f64 {
        if self.visits > 0 {
            self.wins / self.visits as f64
        } else {
            0.0
        }
    }

    /// Color of the player to move from this node.
    #[inline]
    pub fn to_move(&self) -> Color {
        self.color.opponent()
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }
}

/// Arena-backed search tree. The root is always [`ROOT`].
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Fresh tree for `board` with `to_move` about to play.
    pub fn new(board: Board, to_move: Color) -> Self {
        let mover = to_move.opponent();
        Self {
            nodes: vec![Node::new(None, Move::pass(mover), board, mover)],
        }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[ROOT]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// UCB1 urgency of `id`; unvisited nodes are infinitely urgent.
    fn ucb1(&self, id: NodeId, exploration: f64) -> f64 {
        let node = &self.nodes[id];
        if node.visits == 0 {
            return f64::INFINITY;
        }
        let parent_visits = node
            .parent
            .map(|p| self.nodes[p].visits)
            .unwrap_or(node.visits);
        let visits = node.visits as f64;
        node.wins / visits + exploration * ((parent_visits as f64).ln() / visits).sqrt()
    }

    /// Child with the highest UCB1; the first one wins ties.
    fn most_urgent(&self, id: NodeId, exploration: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &self.nodes[id].children {
            let urgency = self.ucb1(child, exploration);
            if best.is_none_or(|(_, b)| urgency > b) {
                best = Some((child, urgency));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Descend from the root while nodes are fully expanded and have children.
    pub fn select(&self, exploration: f64) -> NodeId {
        let mut id = ROOT;
        while self.nodes[id].is_fully_expanded() {
            match self.most_urgent(id, exploration) {
                Some(child) => id = child,
                None => break,
            }
        }
        id
    }

    /// Expand one random untried move of `id` and return the new child.
    ///
    /// Returns `id` itself if nothing is left to expand.
    pub fn expand(&mut self, id: NodeId, rng: &mut fastrand::Rng) -> NodeId {
        let node = &mut self.nodes[id];
        if node.untried.is_empty() {
            return id;
        }
        let mv = node.untried.swap_remove(rng.usize(..node.untried.len()));
        let board = match node.board.apply(mv) {
            Ok(board) => board,
            Err(e) => unreachable!("untried move {mv:?} rejected by the rules: {e}"),
        };
        let child = self.nodes.len();
        self.nodes.push(Node::new(Some(id), mv, board, mv.color));
        self.nodes[id].children.push(child);
        child
    }

    /// Credit a playout result to `id` and every ancestor.
    pub fn backpropagate(&mut self, id: NodeId, winner: Option<Color>) {
        let mut current = Some(id);
        while let Some(n) = current {
            let parent = self.nodes[n].parent;
            self.nodes[n].visits += 1;
            if let Some(p) = parent {
                let perspective = self.nodes[p].color;
                self.nodes[n].wins += match winner {
                    Some(w) if w == perspective => 1.0,
                    None => 0.5,
                    _ => 0.0,
                };
            }
            current = parent;
        }
    }

    /// Most visited child of the root; ties go to the lowest point index.
    pub fn most_visited_child(&self) -> Option<NodeId> {
        self.root()
            .children
            .iter()
            .copied()
            .max_by_key(|&c| {
                let node = &self.nodes[c];
                (node.visits, std::cmp::Reverse(node.mv.point))
            })
    }

    /// Child of the root whose position matches `board`.
    pub fn find_child(&self, board: &Board) -> Option<NodeId> {
        self.root()
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].board.hash() == board.hash())
    }

    /// Detach the subtree under `id` as a new tree, keeping its statistics.
    pub fn into_subtree(self, id: NodeId) -> Tree {
        let mut slots: Vec<Option<Node>> = self.nodes.into_iter().map(Some).collect();
        let mut nodes: Vec<Node> = Vec::new();
        let mut queue = VecDeque::from([(id, None)]);

        while let Some((old, parent)) = queue.pop_front() {
            let Some(mut node) = slots[old].take() else {
                continue;
            };
            let new_id = nodes.len();
            for &c in &node.children {
                queue.push_back((c, Some(new_id)));
            }
            node.parent = parent;
            node.children.clear();
            if let Some(p) = parent {
                nodes[p].children.push(new_id);
            }
            nodes.push(node);
        }
        Tree { nodes }
    }
}

/// How long a search may run. The two limits are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// Fixed number of simulations
    Simulations(usize),
    /// Wall-clock limit, checked between simulations
    Time(Duration),
}

/// Search configuration.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    pub budget: Budget,
    /// UCB1 exploration constant
    pub exploration: f64,
    /// Shrink the exploration constant once half the budget is used
    pub decay_exploration: bool,
    /// Keep the chosen subtree between calls
    pub reuse_tree: bool,
    /// Komi used to score playouts
    pub komi: f64,
    /// Seed for reproducible searches
    pub seed: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            budget: Budget::Simulations(N_SIMS),
            exploration: std::f64::consts::SQRT_2,
            decay_exploration: true,
            reuse_tree: true,
            komi: DEFAULT_KOMI,
            seed: None,
        }
    }
}

/// Summary of the last search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStats {
    pub simulations: usize,
    pub tree_size: usize,
    /// Visits of the chosen child
    pub visits: u32,
    /// Win rate of the chosen move for the searching color. Child win totals
    /// are kept for the color that moved into the root, so this is one minus
    /// the chosen child's own win rate.
    pub winrate: f64,
    /// Whether the search started from a retained subtree
    pub reused: bool,
    pub elapsed: Duration,
}

/// MCTS player.
pub struct MctsBot {
    config: MctsConfig,
    rng: fastrand::Rng,
    retained: Option<Tree>,
    stats: Option<SearchStats>,
}

impl Default for MctsBot {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}

impl MctsBot {
    pub fn new(config: MctsConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Self {
            config,
            rng,
            retained: None,
            stats: None,
        }
    }

    /// Bot with a simulation budget and otherwise default settings.
    pub fn with_simulations(sims: usize) -> Self {
        Self::new(MctsConfig {
            budget: Budget::Simulations(sims),
            ..MctsConfig::default()
        })
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn set_komi(&mut self, komi: f64) {
        self.config.komi = komi;
    }

    /// Statistics of the most recent search.
    pub fn last_stats(&self) -> Option<SearchStats> {
        self.stats
    }

    /// Subtree kept for the next search, if any.
    pub fn retained(&self) -> Option<&Tree> {
        self.retained.as_ref()
    }

    /// Forget any retained subtree (after undo or a new game).
    pub fn reset(&mut self) {
        self.retained = None;
    }

    /// Search `board` and return the move for `color`, or a pass if it has none.
    pub fn select_move(&mut self, board: &Board, color: Color) -> Move {
        let start = Instant::now();
        let (mut tree, reused) = match self.reusable_tree(board, color) {
            Some(tree) => (tree, true),
            None => (Tree::new(board.clone(), color), false),
        };

        let mut simulations = 0;
        while !self.budget_spent(simulations, start.elapsed()) {
            let exploration = self.exploration(simulations, start.elapsed());
            let leaf = tree.select(exploration);
            let node = tree.expand(leaf, &mut self.rng);
            let playout = {
                let n = tree.node(node);
                mcplayout(&n.board, n.to_move(), self.config.komi, &mut self.rng)
            };
            tree.backpropagate(node, playout.winner());
            simulations += 1;
        }

        let tree_size = tree.len();
        let Some(best) = tree.most_visited_child() else {
            tracing::debug!(simulations, "no legal moves for {color}, passing");
            self.retained = None;
            self.stats = Some(SearchStats {
                simulations,
                tree_size,
                visits: 0,
                winrate: 0.0,
                reused,
                elapsed: start.elapsed(),
            });
            return Move::pass(color);
        };

        let chosen = tree.node(best);
        let mv = chosen.mv;
        let stats = SearchStats {
            simulations,
            tree_size,
            visits: chosen.visits,
            winrate: 1.0 - chosen.winrate(),
            reused,
            elapsed: start.elapsed(),
        };
        tracing::debug!(
            simulations,
            tree_size,
            visits = stats.visits,
            winrate = stats.winrate,
            reused,
            "mcts selected {:?}",
            board.xy(mv.point)
        );
        self.stats = Some(stats);
        self.retained = self.config.reuse_tree.then(|| tree.into_subtree(best));
        mv
    }

    /// Take the retained subtree if it can serve as the root for `board`.
    ///
    /// Matches either a child of the retained root (the opponent answered) or
    /// the retained root itself (the same bot plays both colors).
    fn reusable_tree(&mut self, board: &Board, color: Color) -> Option<Tree> {
        if !self.config.reuse_tree {
            return None;
        }
        let tree = self.retained.take()?;
        let mover = color.opponent();
        let root = tree.root();
        if root.board.hash() == board.hash() && root.color == mover {
            tracing::trace!(visits = root.visits, "reusing retained root");
            return Some(tree);
        }
        match tree.find_child(board) {
            Some(child) if tree.node(child).color == mover => {
                tracing::trace!(visits = tree.node(child).visits, "reusing retained child");
                Some(tree.into_subtree(child))
            }
            _ => {
                tracing::trace!("retained tree does not match, starting fresh");
                None
            }
        }
    }

    fn budget_spent(&self, simulations: usize, elapsed: Duration) -> bool {
        match self.config.budget {
            Budget::Simulations(n) => simulations >= n,
            Budget::Time(limit) => elapsed >= limit,
        }
    }

    fn exploration(&self, simulations: usize, elapsed: Duration) -> f64 {
        let late = match self.config.budget {
            Budget::Simulations(n) => simulations > n / 2,
            Budget::Time(limit) => elapsed > limit / 2,
        };
        if self.config.decay_exploration && late {
            self.config.exploration * EXPLORATION_DECAY
        } else {
            self.config.exploration
        }
    }
}
