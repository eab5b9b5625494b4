//! Active cards and per-frame ordering
//!
//! A frame is: every card sees every event, then every card updates, then
//! every card draws. Cards draw in insertion order, so later cards end up on
//! top.

use glam::Vec2;

use crate::card::{Bounds, Card, InputEvent};
use crate::renderer::{IconRenderer, Image};

/// The cards currently in play
#[derive(Debug, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Take a card off the board
    pub fn remove(&mut self, id: u32) -> Option<Card> {
        let index = self.cards.iter().position(|c| c.id() == id)?;
        Some(self.cards.remove(index))
    }

    pub fn get(&self, id: u32) -> Option<&Card> {
        self.cards.iter().find(|c| c.id() == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id() == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Card> {
        self.cards.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Run one frame. Returns the screen rectangles drawn, in draw order.
    pub fn frame(
        &mut self,
        events: &[InputEvent],
        pointer: Vec2,
        dt: f32,
        screen: &mut Image,
        icons: &mut dyn IconRenderer,
    ) -> Vec<Bounds> {
        for card in &mut self.cards {
            for event in events {
                card.handle_event(event, pointer);
            }
        }

        for card in &mut self.cards {
            card.update(dt);
        }

        self.cards
            .iter_mut()
            .map(|card| card.draw(screen, icons))
            .collect()
    }
}
