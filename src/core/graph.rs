//! Prerequisite graph engine
//!
//! The graph keeps two association lists, like an adjacency list in both
//! directions:
//! - `dependencies`: course code -> prerequisite codes (declared order)
//! - `dependents`: course code -> codes of courses that require it
//!
//! Traversals guard against cycles by tracking the codes on the current
//! recursion path, so a malformed catalog produces [`GraphError::Cycle`]
//! instead of unbounded recursion.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Errors raised by graph traversals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A prerequisite cycle; the path starts and ends with the same code
    Cycle(Vec<String>),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cycle(path) => write!(f, "Prerequisite cycle detected: {}", path.join(" -> ")),
        }
    }
}

impl std::error::Error for GraphError {}

/// Directed graph of course prerequisites
#[derive(Debug, Clone, Default)]
pub struct PrerequisiteGraph {
    /// Maps course code -> list of prerequisite codes
    pub dependencies: HashMap<String, Vec<String>>,

    /// Maps course code -> list of courses that depend on it
    pub dependents: HashMap<String, Vec<String>>,

    /// All course codes in insertion order
    pub courses: Vec<String>,
}

impl PrerequisiteGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a course node
    pub fn add_course(&mut self, code: &str) {
        if !self.dependencies.contains_key(code) {
            self.courses.push(code.to_string());
            self.dependencies.insert(code.to_string(), Vec::new());
            self.dependents.insert(code.to_string(), Vec::new());
        }
    }

    /// Add a prerequisite edge
    ///
    /// # Arguments
    /// * `code` - Course that requires the prerequisite
    /// * `prerequisite` - Course that must be taken first
    pub fn add_prerequisite(&mut self, code: &str, prerequisite: &str) {
        self.add_course(code);
        self.add_course(prerequisite);

        if let Some(deps) = self.dependencies.get_mut(code) {
            if !deps.iter().any(|d| d == prerequisite) {
                deps.push(prerequisite.to_string());
            }
        }

        if let Some(deps) = self.dependents.get_mut(prerequisite) {
            if !deps.iter().any(|d| d == code) {
                deps.push(code.to_string());
            }
        }
    }

    /// Direct prerequisites of a course, or `None` if the course is unknown
    #[must_use]
    pub fn get_prerequisites(&self, code: &str) -> Option<&[String]> {
        self.dependencies.get(code).map(Vec::as_slice)
    }

    /// Courses that directly require a course, or `None` if the course is unknown
    #[must_use]
    pub fn get_dependents(&self, code: &str) -> Option<&[String]> {
        self.dependents.get(code).map(Vec::as_slice)
    }

    /// Number of course nodes
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Transitive prerequisite chain of a course
    ///
    /// Each direct prerequisite is appended, followed immediately by its own
    /// expanded chain. A shared ancestor reached along two paths appears twice.
    /// Unknown courses yield an empty chain.
    ///
    /// # Errors
    /// Returns [`GraphError::Cycle`] if a prerequisite cycle is reachable from
    /// the course.
    pub fn prerequisite_chain(&self, code: &str) -> Result<Vec<String>, GraphError> {
        let Some(direct) = self.dependencies.get(code) else {
            return Ok(Vec::new());
        };

        let mut chain = Vec::new();
        let mut path = vec![code.to_string()];
        self.expand_chain(direct, &mut path, &mut chain)?;
        Ok(chain)
    }

    fn expand_chain(
        &self,
        prerequisites: &[String],
        path: &mut Vec<String>,
        chain: &mut Vec<String>,
    ) -> Result<(), GraphError> {
        for prereq in prerequisites {
            if let Some(pos) = path.iter().position(|c| c == prereq) {
                let mut cycle = path[pos..].to_vec();
                cycle.push(prereq.clone());
                return Err(GraphError::Cycle(cycle));
            }

            chain.push(prereq.clone());

            if let Some(next) = self.dependencies.get(prereq) {
                path.push(prereq.clone());
                self.expand_chain(next, path, chain)?;
                path.pop();
            }
        }
        Ok(())
    }

    /// Prerequisite chain with duplicates removed (first occurrence kept)
    ///
    /// # Errors
    /// Returns [`GraphError::Cycle`] if a prerequisite cycle is reachable.
    pub fn prerequisite_closure(&self, code: &str) -> Result<Vec<String>, GraphError> {
        let mut seen = HashSet::new();
        Ok(self
            .prerequisite_chain(code)?
            .into_iter()
            .filter(|c| seen.insert(c.clone()))
            .collect())
    }

    /// All courses that transitively require a course, breadth-first
    ///
    /// The starting course is never included. Unknown courses yield an empty list.
    #[must_use]
    pub fn dependents_chain(&self, code: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([code]);
        let mut queue: VecDeque<&str> = VecDeque::from([code]);

        while let Some(current) = queue.pop_front() {
            for dependent in self.dependents.get(current).into_iter().flatten() {
                if visited.insert(dependent.as_str()) {
                    result.push(dependent.clone());
                    queue.push_back(dependent.as_str());
                }
            }
        }

        result
    }

    /// Find any prerequisite cycle in the graph
    ///
    /// # Returns
    /// The cycle path (first and last codes equal), or `None` for an acyclic graph
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut finished: HashSet<String> = HashSet::new();

        for course in &self.courses {
            if finished.contains(course) {
                continue;
            }
            let mut path = Vec::new();
            if let Some(cycle) = self.cycle_from(course, &mut path, &mut finished) {
                return Some(cycle);
            }
        }
        None
    }

    fn cycle_from(
        &self,
        code: &str,
        path: &mut Vec<String>,
        finished: &mut HashSet<String>,
    ) -> Option<Vec<String>> {
        if let Some(pos) = path.iter().position(|c| c == code) {
            let mut cycle = path[pos..].to_vec();
            cycle.push(code.to_string());
            return Some(cycle);
        }
        if finished.contains(code) {
            return None;
        }

        path.push(code.to_string());
        for prereq in self.dependencies.get(code).into_iter().flatten() {
            if let Some(cycle) = self.cycle_from(prereq, path, finished) {
                return Some(cycle);
            }
        }
        path.pop();
        finished.insert(code.to_string());
        None
    }

    /// Order courses so every prerequisite precedes the courses requiring it
    ///
    /// Ties keep insertion order.
    ///
    /// # Errors
    /// Returns [`GraphError::Cycle`] if the graph is not acyclic.
    pub fn topological_order(&self) -> Result<Vec<String>, GraphError> {
        let mut remaining: HashMap<&str, usize> = self
            .courses
            .iter()
            .map(|c| (c.as_str(), self.dependencies.get(c).map_or(0, Vec::len)))
            .collect();

        let mut queue: VecDeque<&str> = self
            .courses
            .iter()
            .map(String::as_str)
            .filter(|c| remaining.get(c) == Some(&0))
            .collect();

        let mut order = Vec::with_capacity(self.courses.len());
        while let Some(current) = queue.pop_front() {
            order.push(current.to_string());
            for dependent in self.dependents.get(current).into_iter().flatten() {
                if let Some(count) = remaining.get_mut(dependent.as_str()) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push_back(dependent.as_str());
                    }
                }
            }
        }

        if order.len() == self.courses.len() {
            Ok(order)
        } else {
            Err(GraphError::Cycle(self.find_cycle().unwrap_or_default()))
        }
    }
}

impl fmt::Display for PrerequisiteGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prerequisite graph ({} courses):", self.courses.len())?;
        writeln!(f)?;

        let mut sorted_courses = self.courses.clone();
        sorted_courses.sort();

        for code in sorted_courses {
            if let Some(deps) = self.dependencies.get(&code) {
                if deps.is_empty() {
                    writeln!(f, "  {code} → (no prerequisites)")?;
                } else {
                    writeln!(f, "  {code} → {}", deps.join(", "))?;
                }
            }
        }

        Ok(())
    }
}
