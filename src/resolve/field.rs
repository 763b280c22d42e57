//! Landing effects.
//!
//! When a player's token comes to rest, the command processor applies
//! whatever the cell holds: meditation on the player's own start cell, a
//! pure diamond, or an element card token that draws from that element's
//! pile and hits the pile's owner.

use rand::Rng;

use crate::board::{Card, CardType, Cell, PileAdvance, Quadrant, TokenKind};
use crate::context::GameContext;
use crate::event::{Notification, SoundEffect};

/// Applies field and card effects to a [`GameContext`], recording
/// notifications for the presentation layer.
pub struct CommandProcessor<'a> {
    ctx: &'a mut GameContext,
    out: &'a mut Vec<Notification>,
}

impl<'a> CommandProcessor<'a> {
    /// Creates a processor over the given context and notification sink.
    pub fn new(ctx: &'a mut GameContext, out: &'a mut Vec<Notification>) -> Self {
        CommandProcessor { ctx, out }
    }

    /// Applies the effects of `actor` landing on `cell`.
    pub fn process_field(&mut self, actor: Quadrant, cell: Cell) {
        if cell == self.ctx.topology.start_cell(actor) {
            self.meditate(actor);
        }

        let Some(kind) = self.ctx.diamonds.token_at(cell) else {
            return;
        };
        self.out.push(Notification::sound(SoundEffect::Collect));
        match kind {
            TokenKind::PureDiamond => self.grant_cash(actor, 1),
            TokenKind::Card(_) => self.process_card(actor, cell),
        }
        if let Some(id) = self.ctx.diamonds.collect(cell) {
            self.out.push(Notification::DiamondCollected { id, cell });
        }
    }

    /// Draws from the pile of the element token on `cell` and applies the
    /// card to that pile's owner. Landing on one's own element only uses
    /// up the card.
    pub fn process_card(&mut self, actor: Quadrant, cell: Cell) {
        let Some(TokenKind::Card(element)) = self.ctx.diamonds.token_at(cell) else {
            return;
        };
        let Some(card) = self.ctx.deck.draw_next(element) else {
            tracing::debug!(%element, "card token on an exhausted pile; no effect");
            return;
        };

        if element != actor {
            self.apply_card(actor, element, card);
        }

        if self.ctx.deck.advance(element) == PileAdvance::Exhausted {
            tracing::info!(%element, "card pile exhausted");
            self.remove_all_card_element(element);
        }
        self.out.push(Notification::sound(SoundEffect::Card));
    }

    fn apply_card(&mut self, actor: Quadrant, target: Quadrant, card: Card) {
        tracing::debug!(%actor, %target, card = card.card_type.title(), "card drawn");
        self.out.push(Notification::banner(card.card_type.title()));
        match card.card_type {
            CardType::Diamond => {
                if self.remove_diamond(target).is_some() {
                    self.grant_cash(actor, 1);
                }
            }
            CardType::Stop => {
                self.ctx.player_mut(target).freeze();
                self.out.push(Notification::PlayerUpdated { player: target });
            }
            CardType::RemoveCard => {
                self.remove_card(target);
            }
            CardType::DoubleDiamond => {
                for _ in 0..2 {
                    if self.remove_diamond(target).is_some() {
                        self.grant_cash(actor, 1);
                    }
                }
            }
        }
    }

    /// Removes a random on-board pure diamond owned by `quadrant`.
    /// Returns its id, or None when the quadrant has none left.
    pub fn remove_diamond(&mut self, quadrant: Quadrant) -> Option<usize> {
        self.remove_random(quadrant, |k| k == TokenKind::PureDiamond)
    }

    /// Removes a random on-board card token owned by `quadrant`.
    pub fn remove_card(&mut self, quadrant: Quadrant) -> Option<usize> {
        self.remove_random(quadrant, TokenKind::is_card)
    }

    /// Clears every token owned by `quadrant` from the board.
    pub fn remove_all_items(&mut self, quadrant: Quadrant) {
        let removed = self.ctx.diamonds.remove_all_items(quadrant);
        self.report_removed(removed);
    }

    /// Clears every card token of `element` from the board, in all quadrants.
    pub fn remove_all_card_element(&mut self, element: Quadrant) {
        let removed = self.ctx.diamonds.remove_all_of_kind(TokenKind::Card(element));
        self.report_removed(removed);
    }

    fn meditate(&mut self, actor: Quadrant) {
        tracing::debug!(%actor, "meditation");
        self.out.push(Notification::banner("meditation"));
        self.ctx
            .diamonds
            .reshuffle_quadrant(actor, &self.ctx.topology, &mut self.ctx.rng);
        let exhausted: Vec<Quadrant> = self.ctx.deck.exhausted().collect();
        for element in exhausted {
            self.ctx.diamonds.remove_all_of_kind(TokenKind::Card(element));
        }
        let moved: Vec<(usize, Cell)> = self
            .ctx
            .diamonds
            .diamonds()
            .iter()
            .filter(|d| d.owner == actor)
            .filter_map(|d| d.position.map(|cell| (d.id, cell)))
            .collect();
        for (id, cell) in moved {
            self.out.push(Notification::DiamondMoved { id, cell });
        }
        self.out.push(Notification::sound(SoundEffect::Meditation));
    }

    fn remove_random<F>(&mut self, quadrant: Quadrant, filter: F) -> Option<usize>
    where
        F: Fn(TokenKind) -> bool,
    {
        let ids = self.ctx.diamonds.on_board(quadrant, filter);
        if ids.is_empty() {
            return None;
        }
        let id = ids[self.ctx.rng.gen_range(0..ids.len())];
        let cell = self.ctx.diamonds.collect_id(id)?;
        self.out.push(Notification::DiamondCollected { id, cell });
        Some(id)
    }

    fn grant_cash(&mut self, player: Quadrant, amount: u32) {
        self.ctx.player_mut(player).cash += amount;
        self.out.push(Notification::PlayerUpdated { player });
    }

    fn report_removed(&mut self, removed: Vec<(usize, Cell)>) {
        for (id, cell) in removed {
            self.out.push(Notification::DiamondCollected { id, cell });
        }
    }
}
