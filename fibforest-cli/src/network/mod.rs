//! Company branch network driven by a line-oriented command script.
//!
//! A script starts with the number of commands, followed by one command per
//! line:
//!
//! - `ADD <branch> <penalty>` registers a branch with a non-negative penalty.
//! - `CONNECT <branch1> <branch2> <distance>` links two branches. The link
//!   weight is `distance / (penalty1 + penalty2)`; connecting the same pair
//!   again replaces the earlier link.
//! - `PRINT_MIN` emits the minimum spanning forest of the current network as
//!   `from:to` tokens separated by single spaces.
//!
//! Blank lines are skipped and do not count as commands.

use std::collections::HashMap;

use fibforest_core::{
    DynamicGraph, EdgeId, GraphError, GraphErrorCode, MsfError, MsfErrorCode, VertexId,
    minimum_spanning_forest,
};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Errors raised while executing network commands.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum NetworkError {
    /// The line matches none of the supported command forms.
    #[error("unrecognised command `{command}`")]
    MalformedCommand {
        /// The offending line, trimmed.
        command: String,
    },
    /// A command referenced a branch that was never added.
    #[error("unknown branch `{branch}`")]
    UnknownBranch {
        /// Label of the missing branch.
        branch: String,
    },
    /// `ADD` reused the label of an existing branch.
    #[error("branch `{branch}` already exists")]
    DuplicateBranch {
        /// The repeated label.
        branch: String,
    },
    /// Both branches of a connection have zero penalty, so no weight exists.
    #[error("branches `{first}` and `{second}` have zero combined penalty")]
    ZeroPenalty {
        /// First branch label.
        first: String,
        /// Second branch label.
        second: String,
    },
    /// The leading command count is missing or not a number.
    #[error("invalid command count `{raw}`")]
    InvalidCount {
        /// The raw count line.
        raw: String,
    },
    /// The script ended before the declared number of commands.
    #[error("script declares {expected} commands but contains only {found}")]
    TruncatedScript {
        /// Declared command count.
        expected: usize,
        /// Commands actually present.
        found: usize,
    },
    /// The graph store rejected the operation.
    #[error(transparent)]
    Graph(#[from] GraphError),
    /// The forest computation failed.
    #[error(transparent)]
    Msf(#[from] MsfError),
}

impl NetworkError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> NetworkErrorCode {
        match self {
            Self::MalformedCommand { .. } => NetworkErrorCode::MalformedCommand,
            Self::UnknownBranch { .. } => NetworkErrorCode::UnknownBranch,
            Self::DuplicateBranch { .. } => NetworkErrorCode::DuplicateBranch,
            Self::ZeroPenalty { .. } => NetworkErrorCode::ZeroPenalty,
            Self::InvalidCount { .. } => NetworkErrorCode::InvalidCount,
            Self::TruncatedScript { .. } => NetworkErrorCode::TruncatedScript,
            Self::Graph(_) => NetworkErrorCode::GraphFailure,
            Self::Msf(_) => NetworkErrorCode::ForestFailure,
        }
    }

    /// Returns the inner [`GraphErrorCode`] when the graph store failed.
    #[must_use]
    pub const fn graph_code(&self) -> Option<GraphErrorCode> {
        match self {
            Self::Graph(error) => Some(error.code()),
            Self::Msf(error) => error.graph_code(),
            _ => None,
        }
    }

    /// Returns the inner [`MsfErrorCode`] when the forest computation failed.
    #[must_use]
    pub const fn msf_code(&self) -> Option<MsfErrorCode> {
        match self {
            Self::Msf(error) => Some(error.code()),
            _ => None,
        }
    }
}

/// Machine-readable error codes for [`NetworkError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NetworkErrorCode {
    /// The line matches none of the supported command forms.
    MalformedCommand,
    /// A command referenced a branch that was never added.
    UnknownBranch,
    /// `ADD` reused the label of an existing branch.
    DuplicateBranch,
    /// Both branches of a connection have zero penalty.
    ZeroPenalty,
    /// The leading command count is missing or not a number.
    InvalidCount,
    /// The script ended before the declared number of commands.
    TruncatedScript,
    /// The graph store rejected the operation.
    GraphFailure,
    /// The forest computation failed.
    ForestFailure,
}

impl NetworkErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedCommand => "NETWORK_MALFORMED_COMMAND",
            Self::UnknownBranch => "NETWORK_UNKNOWN_BRANCH",
            Self::DuplicateBranch => "NETWORK_DUPLICATE_BRANCH",
            Self::ZeroPenalty => "NETWORK_ZERO_PENALTY",
            Self::InvalidCount => "NETWORK_INVALID_COUNT",
            Self::TruncatedScript => "NETWORK_TRUNCATED_SCRIPT",
            Self::GraphFailure => "NETWORK_GRAPH_FAILURE",
            Self::ForestFailure => "NETWORK_FOREST_FAILURE",
        }
    }
}

/// A [`NetworkError`] tagged with the 1-based script line that caused it.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("line {line}: {error}")]
pub struct ScriptError {
    /// Script line of the failing command.
    pub line: usize,
    /// The underlying failure.
    #[source]
    pub error: NetworkError,
}

impl ScriptError {
    /// Returns the code of the underlying [`NetworkError`].
    #[must_use]
    pub const fn code(&self) -> NetworkErrorCode {
        self.error.code()
    }
}

/// A parsed script command borrowing its labels from the input line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NetworkCommand<'a> {
    /// `ADD <branch> <penalty>`
    Add {
        /// Label of the new branch.
        branch: &'a str,
        /// Penalty of the new branch.
        penalty: u32,
    },
    /// `CONNECT <branch1> <branch2> <distance>`
    Connect {
        /// First endpoint label.
        first: &'a str,
        /// Second endpoint label.
        second: &'a str,
        /// Distance between the branches.
        distance: u32,
    },
    /// `PRINT_MIN`
    PrintMin,
}

impl<'a> NetworkCommand<'a> {
    /// Parses one command line.
    ///
    /// Tokens are separated by whitespace and numbers must be plain decimal
    /// digits.
    ///
    /// # Errors
    /// Returns [`NetworkError::MalformedCommand`] when the line matches no
    /// command form.
    ///
    /// # Examples
    /// ```
    /// use fibforest_cli::network::NetworkCommand;
    ///
    /// assert_eq!(
    ///     NetworkCommand::parse("ADD hub 3"),
    ///     Ok(NetworkCommand::Add { branch: "hub", penalty: 3 }),
    /// );
    /// assert!(NetworkCommand::parse("ADD hub -3").is_err());
    /// ```
    pub fn parse(line: &'a str) -> Result<Self, NetworkError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let command = match tokens.as_slice() {
            ["PRINT_MIN"] => Some(Self::PrintMin),
            ["ADD", branch, penalty] => {
                parse_number(penalty).map(|penalty| Self::Add { branch, penalty })
            }
            ["CONNECT", first, second, distance] => {
                parse_number(distance).map(|distance| Self::Connect {
                    first,
                    second,
                    distance,
                })
            }
            _ => None,
        };
        command.ok_or_else(|| NetworkError::MalformedCommand {
            command: line.trim().to_owned(),
        })
    }
}

fn parse_number(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// A branch of the company network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branch {
    label: String,
    penalty: u32,
}

impl Branch {
    /// Returns the branch label.
    #[must_use]
    #[rustfmt::skip]
    pub fn label(&self) -> &str { &self.label }

    /// Returns the branch penalty.
    #[must_use]
    #[rustfmt::skip]
    pub fn penalty(&self) -> u32 { self.penalty }
}

/// Branch network context owning the graph and the label index.
///
/// # Examples
/// ```
/// use fibforest_cli::network::CompanyNetwork;
///
/// let mut network = CompanyNetwork::new();
/// let outputs = network.run_script("4\nADD A 1\nADD B 2\nCONNECT A B 6\nPRINT_MIN\n")?;
/// assert_eq!(outputs, ["A:B"]);
/// # Ok::<(), fibforest_cli::network::ScriptError>(())
/// ```
#[derive(Debug, Default)]
pub struct CompanyNetwork {
    graph: DynamicGraph<Branch, f64>,
    branches: HashMap<String, VertexId>,
}

impl CompanyNetwork {
    /// Creates an empty network.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered branches.
    #[must_use]
    pub fn branch_count(&self) -> usize {
        self.graph.vertex_count()
    }

    /// Returns the number of links between branches.
    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns the underlying graph.
    #[must_use]
    pub fn graph(&self) -> &DynamicGraph<Branch, f64> {
        &self.graph
    }

    /// Registers a branch.
    ///
    /// # Errors
    /// Returns [`NetworkError::DuplicateBranch`] when `label` is taken.
    pub fn add_branch(&mut self, label: &str, penalty: u32) -> Result<VertexId, NetworkError> {
        if self.branches.contains_key(label) {
            return Err(NetworkError::DuplicateBranch {
                branch: label.to_owned(),
            });
        }
        let vertex = self.graph.insert_vertex(Branch {
            label: label.to_owned(),
            penalty,
        });
        self.branches.insert(label.to_owned(), vertex);
        debug!(branch = label, penalty, "branch added");
        Ok(vertex)
    }

    /// Links two branches at `distance`, replacing any existing link.
    ///
    /// # Errors
    /// Returns [`NetworkError::UnknownBranch`] for unregistered labels,
    /// [`NetworkError::ZeroPenalty`] when both penalties are zero, and
    /// [`NetworkError::Graph`] when both labels name the same branch.
    pub fn connect(&mut self, first: &str, second: &str, distance: u32) -> Result<EdgeId, NetworkError> {
        let (from, from_penalty) = self.lookup(first)?;
        let (to, to_penalty) = self.lookup(second)?;
        let penalty = f64::from(from_penalty) + f64::from(to_penalty);
        if penalty == 0.0 {
            return Err(NetworkError::ZeroPenalty {
                first: first.to_owned(),
                second: second.to_owned(),
            });
        }
        let weight = f64::from(distance) / penalty;
        let edge = self.graph.insert_edge(from, to, weight)?;
        debug!(first, second, weight, "branches connected");
        Ok(edge)
    }

    /// Renders the minimum spanning forest as `from:to` tokens in the order
    /// the forest builder selected them.
    ///
    /// # Errors
    /// Returns [`NetworkError::Msf`] when the forest computation fails.
    pub fn minimum_forest(&self) -> Result<String, NetworkError> {
        let forest = minimum_spanning_forest(&self.graph, 0.0, f64::MAX)?;
        let mut tokens = Vec::with_capacity(forest.edges().len());
        for edge in forest.edges() {
            let from = self.graph.label(edge.from())?;
            let to = self.graph.label(edge.to())?;
            tokens.push(format!("{}:{}", from.label, to.label));
        }
        Ok(tokens.join(" "))
    }

    /// Executes one command, returning its output line if it produces one.
    ///
    /// # Errors
    /// Propagates the failure of the underlying operation.
    pub fn execute(&mut self, command: NetworkCommand<'_>) -> Result<Option<String>, NetworkError> {
        match command {
            NetworkCommand::Add { branch, penalty } => {
                self.add_branch(branch, penalty)?;
                Ok(None)
            }
            NetworkCommand::Connect {
                first,
                second,
                distance,
            } => {
                self.connect(first, second, distance)?;
                Ok(None)
            }
            NetworkCommand::PrintMin => self.minimum_forest().map(Some),
        }
    }

    /// Runs a complete script and collects the output lines.
    ///
    /// Lines after the declared number of commands are ignored.
    ///
    /// # Errors
    /// Returns a [`ScriptError`] naming the first failing line.
    #[instrument(name = "cli.network.run_script", skip(self, script), err)]
    pub fn run_script(&mut self, script: &str) -> Result<Vec<String>, ScriptError> {
        let mut lines = script
            .lines()
            .enumerate()
            .map(|(index, line)| (index + 1, line))
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((count_line, raw_count)) = lines.next() else {
            return Err(ScriptError {
                line: 1,
                error: NetworkError::InvalidCount { raw: String::new() },
            });
        };
        let expected: usize = raw_count.trim().parse().map_err(|_| ScriptError {
            line: count_line,
            error: NetworkError::InvalidCount {
                raw: raw_count.trim().to_owned(),
            },
        })?;

        let mut outputs = Vec::new();
        let mut last_line = count_line;
        for found in 0..expected {
            let Some((line, raw)) = lines.next() else {
                return Err(ScriptError {
                    line: last_line + 1,
                    error: NetworkError::TruncatedScript { expected, found },
                });
            };
            last_line = line;
            let at_line = |error| ScriptError { line, error };
            let command = NetworkCommand::parse(raw).map_err(at_line)?;
            if let Some(output) = self.execute(command).map_err(at_line)? {
                outputs.push(output);
            }
        }

        let ignored = lines.count();
        if ignored > 0 {
            warn!(ignored, "script has lines beyond the declared command count");
        }
        info!(
            commands = expected,
            outputs = outputs.len(),
            branches = self.branch_count(),
            connections = self.connection_count(),
            "script completed"
        );
        Ok(outputs)
    }

    fn lookup(&self, label: &str) -> Result<(VertexId, u32), NetworkError> {
        let vertex = *self
            .branches
            .get(label)
            .ok_or_else(|| NetworkError::UnknownBranch {
                branch: label.to_owned(),
            })?;
        Ok((vertex, self.graph.label(vertex)?.penalty))
    }
}
