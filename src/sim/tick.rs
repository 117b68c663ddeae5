//! Per-frame simulation tick
//!
//! Advances every ball by one step, resolves walls, obstacles and the
//! paddle, runs the score-driven spawner and detects the loss condition.

use super::collision::{Axis, ball_obstacle_collision, hits_ceiling, hits_side_wall, paddle_english};
use super::state::{GameEvent, GamePhase, GameState};

/// Advance the game state by one tick. Does nothing unless the session is running.
pub fn tick(state: &mut GameState) {
    if !state.is_active() {
        return;
    }

    let width = state.settings.surface_width;
    let height = state.settings.surface_height;
    let paddle_top = state.settings.paddle_top();
    let english = state.settings.paddle_english;

    let mut lost = false;

    // Balls spawned below are picked up next tick
    let ball_count = state.balls.len();
    for i in 0..ball_count {
        let ball = &mut state.balls[i];
        ball.pos += ball.vel;

        if hits_side_wall(ball, width) {
            ball.vel = Axis::Horizontal.reflect(ball.vel);
        }
        if hits_ceiling(ball) {
            ball.vel = Axis::Vertical.reflect(ball.vel);
        }

        // Every overlapping obstacle reflects on its own; two stacked
        // obstacles cancel out
        for obstacle in &state.obstacles {
            if let Some(axis) = ball_obstacle_collision(ball, obstacle) {
                ball.vel = axis.reflect(ball.vel);
            }
        }

        if ball.bottom() > paddle_top {
            if state.paddle.spans(ball.pos.x) {
                ball.vel.x += paddle_english(ball.pos.x, &state.paddle, english);
                ball.vel = Axis::Vertical.reflect(ball.vel);
                let ball_id = ball.id;
                state.score_paddle_hit(ball_id);
            } else if ball.bottom() > height {
                let ball_id = ball.id;
                state.events.push(GameEvent::BallLost { ball_id });
                lost = true;
            }
        }
    }

    // A ball can be fully below the surface yet inside the paddle span
    if state.balls.iter().any(|b| b.top() > height) {
        lost = true;
    }

    if lost {
        end_session(state);
    }
}

/// Stop the run and report the final score
fn end_session(state: &mut GameState) {
    state.phase = GamePhase::Over;
    state.events.push(GameEvent::GameOver { score: state.score });
    log::info!("Game over with score {}", state.score);
}
