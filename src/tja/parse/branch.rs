//! Branch selection interface and the collection of branch blocks.
//!
//! An object implementing [`BranchSelector`] is required by [`super::ParseConfig`]. The game decides a branch at
//! `#BRANCHSTART` from the live accuracy, roll hits or score, which a static parser cannot know. So the parser
//! asks the selector which of the declared branches to splice into the timeline, and drops the others.

use std::iter::Peekable;

use itertools::Itertools;

use crate::tja::{
    command::BranchKind,
    lex::token::{Token, TokenWithRange},
};

/// An interface to choose one of the branches declared in a block.
pub trait BranchSelector {
    /// Chooses a branch from `declared`, which is sorted in ascending order and not empty.
    fn select(&self, declared: &[BranchKind]) -> BranchKind;
}

/// Always chooses the most difficult branch declared: master, then expert, then normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighestBranch;

impl BranchSelector for HighestBranch {
    fn select(&self, declared: &[BranchKind]) -> BranchKind {
        declared.iter().copied().max().unwrap_or(BranchKind::Normal)
    }
}

/// Chooses the branch if declared, otherwise falls back to [`HighestBranch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferBranch(pub BranchKind);

impl BranchSelector for PreferBranch {
    fn select(&self, declared: &[BranchKind]) -> BranchKind {
        if declared.contains(&self.0) {
            self.0
        } else {
            HighestBranch.select(declared)
        }
    }
}

impl<S: BranchSelector + ?Sized> BranchSelector for &S {
    fn select(&self, declared: &[BranchKind]) -> BranchKind {
        (**self).select(declared)
    }
}

/// Tokens of a branch block, from `#BRANCHSTART` to the end of the block.
#[derive(Debug, Default)]
pub(super) struct BranchBlock<'t, 'a> {
    /// Tokens before the first section marker, which belong to every branch.
    pub(super) common: Vec<&'t TokenWithRange<'a>>,
    /// Sections in order of appearance. A branch marked twice in the block is merged into one section.
    pub(super) sections: Vec<(BranchKind, Vec<&'t TokenWithRange<'a>>)>,
}

impl<'t, 'a> BranchBlock<'t, 'a> {
    /// Collects tokens just after `#BRANCHSTART`.
    ///
    /// The block ends at `#BRANCHEND` (consumed), or before the next `#BRANCHSTART` or `#END`, or at the end of
    /// the source.
    pub(super) fn collect<I>(tokens: &mut Peekable<I>) -> Self
    where
        I: Iterator<Item = &'t TokenWithRange<'a>>,
    {
        let mut block = Self::default();
        let mut current: Option<usize> = None;
        while let Some(&token) = tokens.peek() {
            let content = token.content();
            if content.is_command("BRANCHSTART") || content.is_command("END") {
                break;
            }
            tokens.next();
            if content.is_command("BRANCHEND") {
                break;
            }
            if let Some(kind) = section_marker(content) {
                current = Some(
                    block
                        .sections
                        .iter()
                        .position(|(declared, _)| *declared == kind)
                        .unwrap_or_else(|| {
                            block.sections.push((kind, vec![]));
                            block.sections.len() - 1
                        }),
                );
                continue;
            }
            match current.and_then(|index| block.sections.get_mut(index)) {
                Some((_, section)) => section.push(token),
                None => block.common.push(token),
            }
        }
        block
    }

    /// Declared branches in ascending order.
    pub(super) fn declared(&self) -> Vec<BranchKind> {
        self.sections.iter().map(|(kind, _)| *kind).sorted().collect()
    }
}

/// Reads `#N`, `#E` or `#M`.
pub(super) fn section_marker(token: &Token<'_>) -> Option<BranchKind> {
    match token {
        Token::Command { name, .. } => match name.as_ref() {
            "N" => Some(BranchKind::Normal),
            "E" => Some(BranchKind::Expert),
            "M" => Some(BranchKind::Master),
            _ => None,
        },
        _ => None,
    }
}

/// Counts balloons in the tokens, to skip their hit counts when the section is dropped.
pub(super) fn count_balloons(tokens: &[&TokenWithRange<'_>]) -> usize {
    tokens
        .iter()
        .filter_map(|token| match token.content() {
            Token::Notes(notes) => Some(notes.chars().filter(|c| matches!(c, '7' | '9')).count()),
            _ => None,
        })
        .sum()
}
