//! Executes parsed scripts against a `ColourTree<Colour>`.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info, instrument};

use crate::application::script::{parse_script, Line, Statement};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Colour, ColourTree, DomainError, NodeId, RenderOptions, TreeNodeConvert};

/// Knobs that change how a script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSettings {
    /// Verify all invariants after every mutating statement
    pub verify_each: bool,
    pub render: RenderOptions,
}

/// Result of one executed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { name: String, colour: Colour, root: bool },
    Inserted { parent: String, child: String },
    Removed { name: String },
    Swapped { a: String, b: String },
    Recoloured { name: String, colour: Colour },
    Checked { name: String, colour: Colour, depth: usize, uniform: bool },
    Expected { name: String, propagated: Option<Colour> },
    Shown(String),
    Verified,
    Discarded { name: String, count: usize },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created { name, colour, root: true } => write!(f, "root {} ({})", name, colour),
            Outcome::Created { name, colour, .. } => write!(f, "node {} ({})", name, colour),
            Outcome::Inserted { parent, child } => write!(f, "put {} under {}", child, parent),
            Outcome::Removed { name } => write!(f, "removed {}", name),
            Outcome::Swapped { a, b } => write!(f, "swapped {} and {}", a, b),
            Outcome::Recoloured { name, colour } => write!(f, "{} is now {}", name, colour),
            Outcome::Checked {
                name,
                colour,
                depth,
                uniform,
            } => write!(f, "{} {} to depth {}: {}", name, colour, depth, uniform),
            Outcome::Expected { name, propagated } => match propagated {
                Some(c) => write!(f, "{} propagates {}", name, c),
                None => write!(f, "{} propagates nothing", name),
            },
            Outcome::Shown(rendered) => write!(f, "{}", rendered.trim_end()),
            Outcome::Verified => write!(f, "invariants hold"),
            Outcome::Discarded { name, count } => write!(f, "discarded {} ({} nodes)", name, count),
        }
    }
}

/// Holds the tree built by a script and the names bound to its nodes.
#[derive(Debug, Default)]
pub struct ScriptRunner {
    tree: Option<ColourTree<Colour>>,
    names: BTreeMap<String, NodeId>,
    settings: RunSettings,
}

impl ScriptRunner {
    pub fn new(settings: RunSettings) -> Self {
        Self {
            tree: None,
            names: BTreeMap::new(),
            settings,
        }
    }

    pub fn tree(&self) -> Option<&ColourTree<Colour>> {
        self.tree.as_ref()
    }

    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Parses and runs `source`, stopping at the first failing line.
    pub fn run_source(&mut self, source: &str) -> ApplicationResult<Vec<Outcome>> {
        let lines = parse_script(source)?;
        self.run(&lines)
    }

    #[instrument(level = "debug", skip(self, lines), fields(count = lines.len()))]
    pub fn run(&mut self, lines: &[Line]) -> ApplicationResult<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(lines.len());
        for line in lines {
            outcomes.push(self.execute(line)?);
        }
        info!("script finished: {} statements", outcomes.len());
        Ok(outcomes)
    }

    pub fn execute(&mut self, line: &Line) -> ApplicationResult<Outcome> {
        debug!(line = line.number, statement = ?line.statement, "execute");
        let number = line.number;
        let at = |source: DomainError| ApplicationError::Statement { line: number, source };

        let outcome = match &line.statement {
            Statement::Root { name, colour } => {
                if self.tree.is_some() {
                    return Err(ApplicationError::Parse {
                        line: number,
                        message: "the tree already has a root".into(),
                    });
                }
                let tree = ColourTree::new(*colour);
                self.names.insert(name.clone(), tree.root());
                self.tree = Some(tree);
                Outcome::Created {
                    name: name.clone(),
                    colour: *colour,
                    root: true,
                }
            }
            Statement::Node { name, colour } => {
                if self.names.contains_key(name) {
                    return Err(ApplicationError::NameTaken {
                        line: number,
                        name: name.clone(),
                    });
                }
                let id = self.tree_mut(number)?.new_node(*colour);
                self.names.insert(name.clone(), id);
                Outcome::Created {
                    name: name.clone(),
                    colour: *colour,
                    root: false,
                }
            }
            Statement::Put { parent, child } => {
                let (p, c) = (self.resolve(number, parent)?, self.resolve(number, child)?);
                self.tree_mut(number)?.insert(p, c).map_err(at)?;
                Outcome::Inserted {
                    parent: parent.clone(),
                    child: child.clone(),
                }
            }
            Statement::Remove { name } => {
                let id = self.resolve(number, name)?;
                self.tree_mut(number)?.remove(id).map_err(at)?;
                Outcome::Removed { name: name.clone() }
            }
            Statement::Swap { a, b } => {
                let (x, y) = (self.resolve(number, a)?, self.resolve(number, b)?);
                self.tree_mut(number)?.swap(x, y).map_err(at)?;
                Outcome::Swapped {
                    a: a.clone(),
                    b: b.clone(),
                }
            }
            Statement::Recolour { name, colour } => {
                let id = self.resolve(number, name)?;
                self.tree_mut(number)?.update_colour(id, *colour).map_err(at)?;
                Outcome::Recoloured {
                    name: name.clone(),
                    colour: *colour,
                }
            }
            Statement::Check {
                name,
                colour,
                depth,
            } => {
                let id = self.resolve(number, name)?;
                let uniform = self
                    .tree_ref(number)?
                    .is_coloured_to_depth_k(id, colour, *depth)
                    .map_err(at)?;
                Outcome::Checked {
                    name: name.clone(),
                    colour: *colour,
                    depth: *depth,
                    uniform,
                }
            }
            Statement::Expect { name, propagated } => {
                let id = self.resolve(number, name)?;
                let actual = self
                    .tree_ref(number)?
                    .propagated_colour(id)
                    .map_err(at)?
                    .copied();
                if actual != *propagated {
                    return Err(ApplicationError::Expectation {
                        line: number,
                        message: format!(
                            "{} propagates {}, expected {}",
                            name,
                            describe(actual),
                            describe(*propagated)
                        ),
                    });
                }
                Outcome::Expected {
                    name: name.clone(),
                    propagated: actual,
                }
            }
            Statement::Show { name } => {
                let tree = self.tree_ref(number)?;
                let start = match name {
                    Some(n) => self.resolve(number, n)?,
                    None => tree.root(),
                };
                let labels = self.labels();
                let rendered = tree
                    .to_tree_string(start, &self.settings.render, &|id| labels.get(&id).cloned())
                    .map_err(at)?;
                Outcome::Shown(rendered.to_string())
            }
            Statement::Verify => {
                self.tree_ref(number)?.verify().map_err(at)?;
                Outcome::Verified
            }
            Statement::Discard { name } => {
                let id = self.resolve(number, name)?;
                let tree = self.tree_mut(number)?;
                let count = tree.discard(id).map_err(at)?;
                let tree = self.tree_ref(number)?;
                let live: BTreeMap<String, NodeId> = self
                    .names
                    .iter()
                    .filter(|(_, id)| tree.contains(**id))
                    .map(|(n, id)| (n.clone(), *id))
                    .collect();
                self.names = live;
                Outcome::Discarded {
                    name: name.clone(),
                    count,
                }
            }
        };

        if self.settings.verify_each && line.statement.is_mutation() {
            self.tree_ref(number)?.verify().map_err(at)?;
        }
        Ok(outcome)
    }

    fn tree_ref(&self, line: usize) -> ApplicationResult<&ColourTree<Colour>> {
        self.tree.as_ref().ok_or(ApplicationError::NoTree { line })
    }

    fn tree_mut(&mut self, line: usize) -> ApplicationResult<&mut ColourTree<Colour>> {
        self.tree.as_mut().ok_or(ApplicationError::NoTree { line })
    }

    fn resolve(&self, line: usize, name: &str) -> ApplicationResult<NodeId> {
        self.tree_ref(line)?;
        self.lookup(name).ok_or_else(|| ApplicationError::UnknownName {
            line,
            name: name.to_string(),
        })
    }

    fn labels(&self) -> BTreeMap<NodeId, String> {
        self.names.iter().map(|(n, id)| (*id, n.clone())).collect()
    }
}

fn describe(colour: Option<Colour>) -> String {
    colour.map_or_else(|| "nothing".to_string(), |c| c.to_string())
}
