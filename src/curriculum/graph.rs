//! Curriculum graph: stages joined by predicate-guarded edges

use std::fmt;

use super::policy::Policy;
use super::stage::Stage;
use super::state::CurriculumId;
use super::transition::StageTransition;
use crate::error::{Error, Result};
use crate::metrics::Metrics;

struct Edge<M> {
    from: usize,
    to: usize,
    transition: StageTransition<M>,
}

/// Directed graph over stages.
///
/// Stages are stored once and referenced by index from the edges. The first
/// stage added is the entry stage. Outgoing edges of a stage are evaluated
/// in the order they were added.
pub struct Curriculum<M> {
    name: String,
    version: String,
    stages: Vec<Stage<M>>,
    edges: Vec<Edge<M>>,
}

impl<M: Metrics> Curriculum<M> {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            stages: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn id(&self) -> CurriculumId {
        CurriculumId {
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }

    /// Register a stage, returning its index.
    ///
    /// Re-adding an identical stage returns the existing index; a different
    /// stage under an existing name is rejected.
    pub fn add_stage(&mut self, stage: Stage<M>) -> Result<usize> {
        if let Some(index) = self.index_of(stage.name()) {
            if self.stages[index].same_definition(&stage) {
                return Ok(index);
            }
            return Err(Error::structure(format!(
                "curriculum '{}' already has a different stage named '{}'",
                self.name,
                stage.name()
            )));
        }
        self.stages.push(stage);
        Ok(self.stages.len() - 1)
    }

    /// Add an edge `from -> to`, registering either stage if new.
    pub fn add_stage_transition(
        &mut self,
        from: Stage<M>,
        to: Stage<M>,
        transition: StageTransition<M>,
    ) -> Result<()> {
        let from = self.add_stage(from)?;
        let to = self.add_stage(to)?;
        if self
            .edges
            .iter()
            .any(|e| e.from == from && e.transition.name() == transition.name())
        {
            return Err(Error::structure(format!(
                "stage '{}' already has a transition named '{}'",
                self.stages[from].name(),
                transition.name()
            )));
        }
        self.edges.push(Edge { from, to, transition });
        Ok(())
    }

    /// The stage new subjects are enrolled into.
    pub fn entry_stage(&self) -> Result<&Stage<M>> {
        self.stages
            .first()
            .ok_or_else(|| Error::structure(format!("curriculum '{}' has no stages", self.name)))
    }

    pub fn stage(&self, name: &str) -> Result<&Stage<M>> {
        self.index_of(name)
            .map(|i| &self.stages[i])
            .ok_or_else(|| Error::UnknownStage {
                curriculum: self.name.clone(),
                stage: name.to_string(),
            })
    }

    /// All stages in registration order.
    pub fn stages(&self) -> &[Stage<M>] {
        &self.stages
    }

    /// Outgoing edges of `from`, in declaration order.
    pub fn transitions_from(&self, from: &str) -> Result<Vec<(&StageTransition<M>, &Stage<M>)>> {
        let index = self.index_of(from).ok_or_else(|| Error::UnknownStage {
            curriculum: self.name.clone(),
            stage: from.to_string(),
        })?;
        Ok(self
            .edges
            .iter()
            .filter(|e| e.from == index)
            .map(|e| (&e.transition, &self.stages[e.to]))
            .collect())
    }

    /// One FSM step: the target of the first firing edge, else `current`.
    ///
    /// First-declared-edge wins when several predicates hold at once.
    pub fn next_stage(&self, current: &str, metrics: &M) -> Result<&Stage<M>> {
        let fired = self
            .transitions_from(current)?
            .into_iter()
            .find(|(transition, _)| transition.fires(metrics))
            .map(|(_, to)| to);
        match fired {
            Some(stage) => Ok(stage),
            None => self.stage(current),
        }
    }

    /// Look up a policy by name among every stage's start policies.
    pub fn policy(&self, name: &str) -> Result<Policy<M>> {
        self.stages
            .iter()
            .flat_map(|s| s.start_policies().iter())
            .find(|p| p.name() == name)
            .copied()
            .ok_or_else(|| Error::UnknownPolicy {
                curriculum: self.name.clone(),
                policy: name.to_string(),
            })
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.stages.iter().position(|s| s.name() == name)
    }
}

impl<M> fmt::Debug for Curriculum<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curriculum")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("stages", &self.stages)
            .field("edges", &self.edges.len())
            .finish()
    }
}
