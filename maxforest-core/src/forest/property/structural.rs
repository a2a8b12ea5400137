//! Structural invariants of a computed forest.
//!
//! For any snapshot the result must be acyclic, contain no self-loops, hold
//! exactly `n - c` edges for `c` connected components, and map each component
//! onto exactly one tree, numbered by its earliest node.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{ExecutionStrategy, ForestResult, TreeId};

use super::{
    oracle::{component_count, find_root},
    types::ForestFixture,
};

/// Runs the structural invariant property for the given fixture.
pub(super) fn run_structural_invariants_property(fixture: &ForestFixture) -> TestCaseResult {
    let result = fixture
        .compute(ExecutionStrategy::Auto)
        .map_err(|err| TestCaseError::fail(format!("compute failed: {err} ({})", fixture.describe())))?;

    validate_selected_edges(fixture, &result)?;
    validate_edge_count(fixture, &result)?;
    validate_tree_membership(fixture, &result)?;
    validate_summaries(fixture, &result)?;
    validate_edge_flags(fixture, &result)?;
    Ok(())
}

fn fail(fixture: &ForestFixture, message: String) -> TestCaseError {
    TestCaseError::fail(format!("{message} ({})", fixture.describe()))
}

/// Selected edges exist, are not self-loops, and never close a cycle.
fn validate_selected_edges(fixture: &ForestFixture, result: &ForestResult<usize>) -> TestCaseResult {
    let mut parent: Vec<usize> = (0..fixture.node_count).collect();
    for &index in result.selected_edge_indices() {
        let Some(&(source, target, _)) = fixture.edges.get(index) else {
            return Err(fail(fixture, format!("selected edge {index} does not exist")));
        };
        if source == target {
            return Err(fail(fixture, format!("self-loop {index} on node {source} was selected")));
        }
        let a = find_root(&mut parent, source);
        let b = find_root(&mut parent, target);
        if a == b {
            return Err(fail(fixture, format!("edge {index} ({source}, {target}) closes a cycle")));
        }
        parent[b] = a;
    }
    Ok(())
}

fn validate_edge_count(fixture: &ForestFixture, result: &ForestResult<usize>) -> TestCaseResult {
    let components = component_count(fixture);
    let expected = fixture.node_count - components;
    let actual = result.selected_edge_indices().len();
    if actual != expected {
        return Err(fail(
            fixture,
            format!("selected {actual} edges, expected n - c = {expected}"),
        ));
    }
    if result.tree_count() != components {
        return Err(fail(
            fixture,
            format!("{} trees for {components} components", result.tree_count()),
        ));
    }
    Ok(())
}

/// Endpoints of every input edge share a tree, and trees are numbered in
/// order of their earliest node.
fn validate_tree_membership(fixture: &ForestFixture, result: &ForestResult<usize>) -> TestCaseResult {
    if result.tree_of().len() != fixture.node_count {
        return Err(fail(
            fixture,
            format!("{} nodes have a tree", result.tree_of().len()),
        ));
    }
    for (index, &(source, target, _)) in fixture.edges.iter().enumerate() {
        if result.tree(&source) != result.tree(&target) {
            return Err(fail(
                fixture,
                format!("edge {index} spans trees {:?} and {:?}", result.tree(&source), result.tree(&target)),
            ));
        }
    }

    let mut next = 0;
    for node in 0..fixture.node_count {
        let Some(tree) = result.tree(&node) else {
            return Err(fail(fixture, format!("node {node} has no tree")));
        };
        if tree.get() == next {
            next += 1;
        } else if tree.get() > next {
            return Err(fail(
                fixture,
                format!("node {node} opens tree {tree} before tree {next}"),
            ));
        }
    }
    Ok(())
}

fn validate_summaries(fixture: &ForestFixture, result: &ForestResult<usize>) -> TestCaseResult {
    let mut nodes = 0;
    for (position, tree) in result.trees().iter().enumerate() {
        if tree.id() != TreeId::new(position) {
            return Err(fail(fixture, format!("tree {position} reports id {}", tree.id())));
        }
        if tree.edge_count() + 1 != tree.node_count() {
            return Err(fail(
                fixture,
                format!(
                    "tree {position} has {} nodes but {} edges",
                    tree.node_count(),
                    tree.edge_count()
                ),
            ));
        }
        if result.tree(tree.root()) != Some(tree.id()) {
            return Err(fail(fixture, format!("root of tree {position} lies outside it")));
        }
        nodes += tree.node_count();
    }
    if nodes != fixture.node_count {
        return Err(fail(fixture, format!("trees cover {nodes} nodes")));
    }
    Ok(())
}

fn validate_edge_flags(fixture: &ForestFixture, result: &ForestResult<usize>) -> TestCaseResult {
    let flags = result.edge_flags();
    if flags.len() != fixture.edges.len() {
        return Err(fail(fixture, format!("{} edge flags", flags.len())));
    }
    for (position, flag) in flags.iter().enumerate() {
        if flag.index != position || flag.is_tree_edge != result.is_tree_edge(position) {
            return Err(fail(fixture, format!("edge flag {position} is {flag:?}")));
        }
    }
    Ok(())
}
