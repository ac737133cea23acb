//! The sliding move.
//!
//! One call to `Level::move_player` moves the player as far as it can go in a
//! direction: it keeps sliding until it leaves the board edge, lands on a `Stop`
//! tile, bumps into a `Wall` or hits a `Mine`.
use crate::engine::Element;
use crate::error::LevelError;
use crate::history::StackItem;
use crate::level::Level;
use crate::position::{Direction, Position};
use tracing::{debug, instrument};

/// Outcome of a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveResult {
    /// The slide completed. It counts as a move and can be undone.
    Ok,
    /// The player hit a mine. It counts as a move but cannot be undone.
    Die,
    /// The player could not move at all. Nothing changed.
    Ko,
}

/// Bookkeeping for the slide in progress.
struct Slide {
    origin_position: Position,
    origin_element: Element,
    collected_lives: Vec<Position>,
    collected_gems: Vec<Position>,
}

impl Slide {
    fn into_stack_item(self) -> StackItem {
        StackItem::new(
            self.origin_position,
            self.origin_element,
            self.collected_lives,
            self.collected_gems,
        )
    }
}

impl Level {
    /// Slides the player in `direction` until something stops it.
    ///
    /// - Leaving the board: the player stays on the last cell. `Ok`.
    /// - `Stop` ahead: the player moves onto it and stays there. `Ok`.
    /// - `Wall` ahead: `Ko` if the player has not moved yet, `Ok` otherwise.
    /// - `Mine` ahead: everything the slide did is reverted and a life is lost. `Die`.
    ///
    /// Gems and extra lives are collected along the way. Every outcome except
    /// `Ko` counts as one move; only `Ok` slides are pushed to the undo history.
    ///
    /// # Errors
    /// Only if the board is inconsistent (no player on it).
    #[instrument(skip(self), fields(moves = self.num_moves))]
    pub fn move_player(&mut self, direction: Direction) -> Result<MoveResult, LevelError> {
        let origin_position = self.player_position()?;
        let mut slide = Slide {
            origin_position,
            origin_element: self.board().element_at(origin_position)?,
            collected_lives: Vec::new(),
            collected_gems: Vec::new(),
        };
        let size = self.size();
        let mut current = origin_position;
        let mut has_moved = false;

        let result = loop {
            let Some(next) = current.step(direction, size) else {
                self.complete_slide(slide);
                break MoveResult::Ok;
            };

            match self.board().element_at(next)? {
                Element::Mine => {
                    self.revert_fatal_slide(current, &slide)?;
                    break MoveResult::Die;
                }
                Element::Stop => {
                    self.board_mut().set_element(current, Element::Empty)?;
                    self.board_mut().set_element(next, Element::PlayerStop)?;
                    self.complete_slide(slide);
                    break MoveResult::Ok;
                }
                Element::Wall if !has_moved => break MoveResult::Ko,
                Element::Wall => {
                    self.complete_slide(slide);
                    break MoveResult::Ok;
                }
                target => {
                    self.vacate(current)?;
                    match target {
                        Element::Gem => {
                            self.num_gems_got += 1;
                            slide.collected_gems.push(next);
                        }
                        Element::ExtraLife => {
                            self.lives = self.lives.gain(1);
                            slide.collected_lives.push(next);
                        }
                        _ => {}
                    }
                    self.board_mut().set_element(next, Element::Player)?;
                    has_moved = true;
                    current = next;
                }
            }
        };

        debug!(?direction, ?result, moves = self.num_moves, "slide resolved");
        Ok(result)
    }

    fn complete_slide(&mut self, slide: Slide) {
        self.push(slide.into_stack_item());
        self.increase_num_moves();
    }

    /// Puts the board back as it was before the slide after the player hit a
    /// mine from `current`.
    ///
    /// Gems picked up during the slide are given back to the board and
    /// removed from the counter. Extra-life tiles reappear too, but the lives
    /// they granted are kept.
    fn revert_fatal_slide(&mut self, current: Position, slide: &Slide) -> Result<(), LevelError> {
        self.vacate(current)?;
        self.board_mut()
            .set_element(slide.origin_position, slide.origin_element)?;
        for &gem in &slide.collected_gems {
            self.board_mut().set_element(gem, Element::Gem)?;
            self.decrease_num_gems_got();
        }
        for &life in &slide.collected_lives {
            self.board_mut().set_element(life, Element::ExtraLife)?;
        }
        self.decrease_num_lives();
        self.increase_num_moves();
        Ok(())
    }
}
