/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use crate::common::{CopyOnWriteList, SelectorRef};
use crate::message::{Message, MessagingError};
use crate::traits::MessageSelector;

/// How a [`MessageSelectorChain`] combines its selectors' votes.
///
/// Whatever the strategy, a message no selector accepts is rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VotingStrategy {
    /// Every selector must accept.
    #[default]
    All,
    /// At least one selector must accept.
    Any,
    /// Strictly more than half of the selectors must accept.
    Majority,
    /// At least half of the selectors must accept.
    MajorityOrTie,
}

/// An ordered list of selectors combined by a [`VotingStrategy`].
///
/// The list can be edited while the chain is in use; each evaluation sees either the
/// list before or after an edit.
#[derive(Debug, Default)]
pub struct MessageSelectorChain {
    strategy: VotingStrategy,
    selectors: CopyOnWriteList<SelectorRef>,
}

impl MessageSelectorChain {
    /// Creates an empty chain voting with `strategy`.
    #[must_use]
    pub fn new(strategy: VotingStrategy) -> Self {
        Self {
            strategy,
            selectors: CopyOnWriteList::default(),
        }
    }

    /// The voting strategy.
    #[must_use]
    pub const fn strategy(&self) -> VotingStrategy {
        self.strategy
    }

    /// Appends `selector`.
    pub fn add(&self, selector: SelectorRef) {
        self.selectors.push(selector);
    }

    /// Replaces the selector at `index`, returning the one it replaced.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Configuration`] when `index` is out of bounds.
    pub fn set(&self, index: usize, selector: SelectorRef) -> Result<SelectorRef, MessagingError> {
        self.selectors
            .set(index, selector)
            .map_err(|_| self.out_of_bounds(index))
    }

    /// Inserts `selector` at `index`, shifting later selectors back.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Configuration`] when `index` is greater than the length.
    pub fn insert(&self, index: usize, selector: SelectorRef) -> Result<(), MessagingError> {
        self.selectors
            .insert(index, selector)
            .map_err(|_| self.out_of_bounds(index))
    }

    /// Replaces every selector.
    pub fn set_selectors(&self, selectors: Vec<SelectorRef>) {
        self.selectors.replace_all(selectors);
    }

    /// Number of selectors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Whether the chain has no selectors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    fn out_of_bounds(&self, index: usize) -> MessagingError {
        MessagingError::Configuration(format!(
            "selector index {index} out of bounds for chain of {}",
            self.len()
        ))
    }
}

impl MessageSelector for MessageSelectorChain {
    fn accept(&self, message: &Message) -> bool {
        let selectors = self.selectors.snapshot();
        if self.strategy == VotingStrategy::Any {
            return selectors.iter().any(|selector| selector.accept(message));
        }
        let total = selectors.len();
        let accepted = selectors
            .iter()
            .filter(|selector| selector.accept(message))
            .count();
        if accepted == 0 {
            return false;
        }
        match self.strategy {
            VotingStrategy::All => accepted == total,
            VotingStrategy::Any => true,
            VotingStrategy::Majority => 2 * accepted > total,
            VotingStrategy::MajorityOrTie => 2 * accepted >= total,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[derive(Debug)]
    struct Fixed(bool);

    impl MessageSelector for Fixed {
        fn accept(&self, _message: &Message) -> bool {
            self.0
        }
    }

    fn chain(strategy: VotingStrategy, votes: &[bool]) -> MessageSelectorChain {
        let chain = MessageSelectorChain::new(strategy);
        for vote in votes {
            chain.add(Arc::new(Fixed(*vote)));
        }
        chain
    }

    #[test]
    fn strategies_count_votes() {
        let message = Message::new(());
        let cases = [
            (VotingStrategy::All, &[true, true][..], true),
            (VotingStrategy::All, &[true, false][..], false),
            (VotingStrategy::Any, &[false, true][..], true),
            (VotingStrategy::Majority, &[true, true, false][..], true),
            (VotingStrategy::Majority, &[true, false][..], false),
            (VotingStrategy::MajorityOrTie, &[true, false][..], true),
            (VotingStrategy::MajorityOrTie, &[true, false, false][..], false),
        ];
        for (strategy, votes, expected) in cases {
            assert_eq!(chain(strategy, votes).accept(&message), expected, "{strategy:?} {votes:?}");
        }
    }

    #[test]
    fn empty_chain_rejects_under_every_strategy() {
        let message = Message::new(());
        for strategy in [
            VotingStrategy::All,
            VotingStrategy::Any,
            VotingStrategy::Majority,
            VotingStrategy::MajorityOrTie,
        ] {
            assert!(!chain(strategy, &[]).accept(&message));
        }
    }

    #[test]
    fn set_overwrites_and_insert_shifts() -> anyhow::Result<()> {
        let chain = chain(VotingStrategy::All, &[true, true]);
        chain.set(1, Arc::new(Fixed(false)))?;
        assert_eq!(chain.len(), 2);
        assert!(!chain.accept(&Message::new(())));

        chain.insert(0, Arc::new(Fixed(true)))?;
        assert_eq!(chain.len(), 3);
        assert!(matches!(
            chain.set(3, Arc::new(Fixed(true))),
            Err(MessagingError::Configuration(_))
        ));
        Ok(())
    }
}
