//! Bird/pillar collision and scoring predicates
//!
//! Pure functions over rect geometry. The tick module decides when these
//! run; nothing here mutates state.

use crate::consts::BIRD_LEFT;

use super::state::{Bird, Pillar};

/// True if the bird interpenetrates either segment of the pillar.
/// Overlap is strict: exactly grazing an edge does not collide, so the
/// bird survives threading a passage its box exactly fills.
pub fn bird_hits_pillar(bird: &Bird, pillar: &Pillar, gap: f32) -> bool {
    let b = bird.rect();
    b.overlaps(&pillar.top_rect()) || b.overlaps(&pillar.bottom_rect(gap))
}

/// True once the pillar's horizontal midpoint has moved past the bird's
/// left anchor. Strict comparison: sitting exactly on the line does not
/// count as passed.
pub fn passed_scoring_line(pillar: &Pillar) -> bool {
    pillar.top_rect().center().x < BIRD_LEFT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn pillar_at(x: f32, gap_top: f32) -> Pillar {
        Pillar {
            id: 1,
            x,
            gap_top,
            scored: false,
        }
    }

    fn bird_at(y: f32) -> Bird {
        Bird { y, vel: 0.0 }
    }

    #[test]
    fn test_no_hit_inside_gap() {
        // Pillar overlapping the bird's column, bird centered in the passage
        let p = pillar_at(BIRD_LEFT, 200.0);
        let b = bird_at(200.0 + (PILLAR_GAP - BIRD_HEIGHT) / 2.0);
        assert!(!bird_hits_pillar(&b, &p, PILLAR_GAP));
    }

    #[test]
    fn test_hit_top_segment() {
        let p = pillar_at(BIRD_LEFT, 200.0);
        // Bird top edge above the passage
        let b = bird_at(150.0);
        assert!(bird_hits_pillar(&b, &p, PILLAR_GAP));
    }

    #[test]
    fn test_hit_bottom_segment() {
        let p = pillar_at(BIRD_LEFT, 200.0);
        // Bird bottom edge below the passage (gap ends at 360)
        let b = bird_at(360.0 - BIRD_HEIGHT + 1.0);
        assert!(bird_hits_pillar(&b, &p, PILLAR_GAP));
    }

    #[test]
    fn test_no_hit_without_horizontal_overlap() {
        // Even fully outside the passage vertically, a pillar to the right
        // of the bird cannot collide
        let p = pillar_at(BIRD_LEFT + BIRD_WIDTH + 1.0, 200.0);
        let b = bird_at(0.0);
        assert!(!bird_hits_pillar(&b, &p, PILLAR_GAP));
    }

    #[test]
    fn test_edge_graze_is_not_a_hit() {
        // Pillar's right edge exactly at the bird's left edge
        let p = pillar_at(BIRD_LEFT - PILLAR_WIDTH, 200.0);
        let b = bird_at(0.0);
        assert!(!bird_hits_pillar(&b, &p, PILLAR_GAP));

        // Bird top edge exactly at the gap top
        let q = pillar_at(BIRD_LEFT, 200.0);
        let flush = bird_at(200.0);
        assert!(!bird_hits_pillar(&flush, &q, PILLAR_GAP));
    }

    #[test]
    fn test_scoring_line_is_strict() {
        // Center at x + width/2; the line sits at the bird's left anchor
        let on_line = pillar_at(BIRD_LEFT - PILLAR_WIDTH / 2.0, 200.0);
        assert!(!passed_scoring_line(&on_line));

        let past = pillar_at(BIRD_LEFT - PILLAR_WIDTH / 2.0 - 0.5, 200.0);
        assert!(passed_scoring_line(&past));
    }
}
