//! Toy harness worlds for the integration tests
//!
//! `TreeGame` is an explicit game tree with hand-written values, `Maze` a
//! small Pacman grid parsed from ASCII, and `Field` an open capture-the-flag
//! board.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashSet};
use std::rc::Rc;

use pacman_agents::capture::CaptureView;
use pacman_agents::game::{GameState, MazeView};
use pacman_agents::reflex::{GhostView, PacmanView};
use pacman_agents::types::{manhattan, AgentId, Coord, Direction};
use rand::Rng;

// ---------------------------------------------------------------------------
// Explicit game tree
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct Node {
    pub value: f64,
    pub children: Vec<Rc<Node>>,
}

pub fn leaf(value: f64) -> Rc<Node> {
    Rc::new(Node {
        value,
        children: vec![],
    })
}

pub fn branch(children: Vec<Rc<Node>>) -> Rc<Node> {
    valued_branch(0.0, children)
}

pub fn valued_branch(value: f64, children: Vec<Rc<Node>>) -> Rc<Node> {
    Rc::new(Node { value, children })
}

/// Random tree with `levels` levels below the root; leaf values are small
/// integers so ties are common.
pub fn random_tree<R: Rng>(rng: &mut R, levels: u32, max_branching: usize) -> Rc<Node> {
    let value = rng.random_range(0..20) as f64;
    if levels == 0 {
        return leaf(value);
    }
    let width = rng.random_range(1..=max_branching);
    let children = (0..width)
        .map(|_| random_tree(rng, levels - 1, max_branching))
        .collect();
    valued_branch(value, children)
}

/// Walks an explicit tree; moves are child indices
#[derive(Debug, Clone)]
pub struct TreeGame {
    pub node: Rc<Node>,
    pub agents: usize,
}

impl TreeGame {
    pub fn new(root: Rc<Node>, agents: usize) -> Self {
        TreeGame { node: root, agents }
    }
}

impl GameState for TreeGame {
    type Move = usize;

    fn legal_moves(&self, _agent: AgentId) -> Vec<usize> {
        (0..self.node.children.len()).collect()
    }

    fn successor(&self, _agent: AgentId, mv: &usize) -> Self {
        TreeGame {
            node: Rc::clone(&self.node.children[*mv]),
            agents: self.agents,
        }
    }

    fn is_terminal(&self) -> bool {
        self.node.children.is_empty()
    }

    fn score(&self) -> f64 {
        self.node.value
    }

    fn num_agents(&self) -> usize {
        self.agents
    }
}

// ---------------------------------------------------------------------------
// Pacman maze
// ---------------------------------------------------------------------------

pub const FOOD_REWARD: f64 = 10.0;
pub const TIME_PENALTY: f64 = 1.0;
pub const WIN_REWARD: f64 = 500.0;
pub const LOSE_PENALTY: f64 = 500.0;

/// Grid world: `%` wall, `.` food, `P` Pacman, `G` ghost. The first row of
/// the layout is the northernmost. Pacmen take the lowest agent indices.
#[derive(Debug, Clone)]
pub struct Maze {
    pub width: i32,
    pub height: i32,
    pub walls: HashSet<Coord>,
    pub food: BTreeSet<Coord>,
    pub agents: Vec<Coord>,
    pub pacmen: usize,
    pub scared: Vec<u32>,
    pub score: f64,
    pub won: bool,
    pub lost: bool,
}

impl Maze {
    pub fn parse(layout: &[&str]) -> Self {
        let height = layout.len() as i32;
        let width = layout[0].len() as i32;
        let mut walls = HashSet::new();
        let mut food = BTreeSet::new();
        let mut pacmen = Vec::new();
        let mut ghosts = Vec::new();

        for (row, line) in layout.iter().enumerate() {
            let y = height - 1 - row as i32;
            for (x, cell) in line.chars().enumerate() {
                let coord = Coord::new(x as i32, y);
                match cell {
                    '%' => {
                        walls.insert(coord);
                    }
                    '.' => {
                        food.insert(coord);
                    }
                    'P' => pacmen.push(coord),
                    'G' => ghosts.push(coord),
                    _ => {}
                }
            }
        }

        let pacman_count = pacmen.len();
        let mut agents = pacmen;
        agents.extend(ghosts);
        let scared = vec![0; agents.len()];

        Maze {
            width,
            height,
            walls,
            food,
            agents,
            pacmen: pacman_count,
            scared,
            score: 0.0,
            won: false,
            lost: false,
        }
    }

    pub fn position(&self, agent: AgentId) -> Coord {
        self.agents[agent]
    }

    fn is_pacman(&self, agent: AgentId) -> bool {
        agent < self.pacmen
    }

    /// Shortest path length between two cells, by plain BFS
    pub fn distance(&self, from: Coord, to: Coord) -> Option<usize> {
        let mut frontier = std::collections::VecDeque::from([(from, 0usize)]);
        let mut seen = HashSet::from([from]);
        while let Some((cell, dist)) = frontier.pop_front() {
            if cell == to {
                return Some(dist);
            }
            for dir in Direction::all() {
                let next = dir.apply(&cell);
                if !self.walls.contains(&next) && seen.insert(next) {
                    frontier.push_back((next, dist + 1));
                }
            }
        }
        None
    }
}

impl MazeView for Maze {
    fn is_wall(&self, coord: Coord) -> bool {
        self.walls.contains(&coord)
            || coord.x < 0
            || coord.y < 0
            || coord.x >= self.width
            || coord.y >= self.height
    }

    fn has_food(&self, coord: Coord) -> bool {
        self.food.contains(&coord)
    }

    fn food_count(&self) -> usize {
        self.food.len()
    }

    fn agent_position(&self, agent: AgentId) -> Option<Coord> {
        self.agents.get(agent).copied()
    }
}

impl GameState for Maze {
    type Move = Direction;

    fn legal_moves(&self, agent: AgentId) -> Vec<Direction> {
        if self.won || self.lost {
            return vec![];
        }
        let here = self.agents[agent];
        let mut moves: Vec<Direction> = Direction::all()
            .iter()
            .copied()
            .filter(|dir| !MazeView::is_wall(self, dir.apply(&here)))
            .collect();
        if self.is_pacman(agent) || moves.is_empty() {
            moves.push(Direction::Stop);
        }
        moves
    }

    fn successor(&self, agent: AgentId, mv: &Direction) -> Self {
        let mut next = self.clone();
        let target = mv.apply(&self.agents[agent]);
        next.agents[agent] = target;

        if self.is_pacman(agent) {
            next.score -= TIME_PENALTY;
            if next.food.remove(&target) {
                next.score += FOOD_REWARD;
                if next.food.is_empty() {
                    next.score += WIN_REWARD;
                    next.won = true;
                }
            }
        }

        let caught = (0..next.pacmen).any(|pacman| {
            next.agents[next.pacmen..]
                .iter()
                .any(|ghost| *ghost == next.agents[pacman])
        });
        if caught && !next.won {
            next.score -= LOSE_PENALTY;
            next.lost = true;
        }
        next
    }

    fn is_terminal(&self) -> bool {
        self.won || self.lost
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn num_agents(&self) -> usize {
        self.agents.len()
    }
}

impl PacmanView for Maze {
    fn pacman_position(&self) -> Coord {
        self.agents[0]
    }

    fn food(&self) -> Vec<Coord> {
        self.food.iter().copied().collect()
    }

    fn ghosts(&self) -> Vec<GhostView> {
        (self.pacmen..self.agents.len())
            .map(|ghost| GhostView {
                position: self.agents[ghost],
                scared_timer: self.scared[ghost],
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Capture field
// ---------------------------------------------------------------------------

/// Open capture board without inner walls. Even agent indices are red and
/// own the western half, odd indices are blue and own the eastern half.
#[derive(Debug, Clone)]
pub struct Field {
    pub width: i32,
    pub height: i32,
    pub agents: Vec<Coord>,
    pub starts: Vec<Coord>,
    pub food: Vec<Coord>,
    pub capsules: Vec<Coord>,
    pub carrying: Vec<u32>,
    pub scared: Vec<u32>,
    /// Red minus blue
    pub score: f64,
}

impl Field {
    pub fn new(width: i32, height: i32, agents: Vec<Coord>) -> Self {
        let count = agents.len();
        Field {
            width,
            height,
            starts: agents.clone(),
            agents,
            food: vec![],
            capsules: vec![],
            carrying: vec![0; count],
            scared: vec![0; count],
            score: 0.0,
        }
    }

    fn is_red(agent: AgentId) -> bool {
        agent % 2 == 0
    }

    fn red_side(&self, coord: Coord) -> bool {
        coord.x < self.width / 2
    }

    fn on_home_side(&self, agent: AgentId, coord: Coord) -> bool {
        Self::is_red(agent) == self.red_side(coord)
    }

    fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }

    fn enemy_side<'a>(&'a self, agent: AgentId, items: &'a [Coord]) -> Vec<Coord> {
        items
            .iter()
            .copied()
            .filter(|c| !self.on_home_side(agent, *c))
            .collect()
    }

    fn home_side<'a>(&'a self, agent: AgentId, items: &'a [Coord]) -> Vec<Coord> {
        items
            .iter()
            .copied()
            .filter(|c| self.on_home_side(agent, *c))
            .collect()
    }
}

impl GameState for Field {
    type Move = Direction;

    fn legal_moves(&self, agent: AgentId) -> Vec<Direction> {
        let here = self.agents[agent];
        let mut moves: Vec<Direction> = Direction::all()
            .iter()
            .copied()
            .filter(|dir| self.in_bounds(dir.apply(&here)))
            .collect();
        moves.push(Direction::Stop);
        moves
    }

    fn successor(&self, agent: AgentId, mv: &Direction) -> Self {
        let mut next = self.clone();
        let target = mv.apply(&self.agents[agent]);
        next.agents[agent] = target;

        if next.on_home_side(agent, target) {
            let banked = next.carrying[agent] as f64;
            next.score += if Self::is_red(agent) { banked } else { -banked };
            next.carrying[agent] = 0;
        } else if let Some(i) = next.food.iter().position(|f| *f == target) {
            next.food.remove(i);
            next.carrying[agent] += 1;
        }

        for other in 0..next.agents.len() {
            if Self::is_red(other) == Self::is_red(agent) || next.agents[other] != target {
                continue;
            }
            // Whoever stands on the enemy side is the Pacman and gets eaten.
            let victim = if next.on_home_side(agent, target) { other } else { agent };
            next.agents[victim] = next.starts[victim];
            next.carrying[victim] = 0;
        }
        next
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn score(&self) -> f64 {
        self.score
    }

    fn num_agents(&self) -> usize {
        self.agents.len()
    }
}

impl CaptureView for Field {
    fn agent_position(&self, agent: AgentId) -> Option<Coord> {
        self.agents.get(agent).copied()
    }

    fn maze_distance(&self, from: Coord, to: Coord) -> u32 {
        manhattan(from, to)
    }

    fn food_to_eat(&self, agent: AgentId) -> Vec<Coord> {
        self.enemy_side(agent, &self.food)
    }

    fn food_to_defend(&self, agent: AgentId) -> Vec<Coord> {
        self.home_side(agent, &self.food)
    }

    fn capsules_to_eat(&self, agent: AgentId) -> Vec<Coord> {
        self.enemy_side(agent, &self.capsules)
    }

    fn capsules_to_defend(&self, agent: AgentId) -> Vec<Coord> {
        self.home_side(agent, &self.capsules)
    }

    fn opponents(&self, agent: AgentId) -> Vec<AgentId> {
        (0..self.agents.len())
            .filter(|other| Self::is_red(*other) != Self::is_red(agent))
            .collect()
    }

    fn is_pacman(&self, agent: AgentId) -> bool {
        !self.on_home_side(agent, self.agents[agent])
    }

    fn scared_timer(&self, agent: AgentId) -> u32 {
        self.scared[agent]
    }

    fn carrying(&self, agent: AgentId) -> u32 {
        self.carrying[agent]
    }

    fn team_score(&self, agent: AgentId) -> f64 {
        if Self::is_red(agent) {
            self.score
        } else {
            -self.score
        }
    }
}
