use super::{EnvError, Environment};
use crate::clock::Clock;
use game_state::{Command, Observation, Obstacle, ObstacleKind};
use rand::rngs::StdRng;
use rand::Rng;
use std::time::{Duration, Instant};

// geometry follows the browser game closely enough for the encoder's bins to
// mean the same thing: y grows downward, the ground is at y = 140, the runner
// stands at x = 50
const FRAME: Duration = Duration::from_micros(16_667);
const CANVAS_WIDTH: f64 = 600.0;
const GROUND_Y: f64 = 140.0;
const RUNNER_X: f64 = 50.0;
const RUNNER_WIDTH: f64 = 44.0;
const RUNNER_HEIGHT: f64 = 47.0;
const RUNNER_DUCK_HEIGHT: f64 = 25.0;
const JUMP_VELOCITY: f64 = 10.0;
const GRAVITY: f64 = 0.6;
const DROP_GRAVITY: f64 = 1.8;
const FLYER_MIN_SPEED: f64 = 8.5;
const FLYER_HEIGHTS: [f64; 3] = [100.0, 75.0, 50.0];
const CLEAR_FRAMES: u32 = 60;
const GAP_COEFFICIENT: f64 = 0.6;

#[derive(Clone, Copy, Debug)]
pub struct SimSettings {
    pub initial_speed: f64,
    pub max_speed: f64,
    pub acceleration: f64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            initial_speed: 6.0,
            max_speed: 13.0,
            acceleration: 0.001,
        }
    }
}

struct Shape {
    width: f64,
    height: f64,
    min_gap: f64,
}

fn shape(kind: ObstacleKind) -> Shape {
    match kind {
        ObstacleKind::Small => Shape {
            width: 17.0,
            height: 35.0,
            min_gap: 120.0,
        },
        ObstacleKind::Large => Shape {
            width: 25.0,
            height: 50.0,
            min_gap: 120.0,
        },
        ObstacleKind::Flyer | ObstacleKind::Unknown => Shape {
            width: 46.0,
            height: 40.0,
            min_gap: 150.0,
        },
    }
}

struct Body {
    obstacle: Obstacle,
    gap: f64,
}

impl Body {
    fn right(&self) -> f64 {
        self.obstacle.x_pos + shape(self.obstacle.kind).width
    }
    fn bottom(&self) -> f64 {
        self.obstacle.y_pos + shape(self.obstacle.kind).height
    }
}

struct Runner {
    // y of the runner's feet
    feet_y: f64,
    velocity: f64,
    ducking: bool,
}

impl Runner {
    fn grounded(&self) -> bool {
        self.feet_y >= GROUND_Y
    }
    fn top(&self) -> f64 {
        let height = if self.ducking && self.grounded() {
            RUNNER_DUCK_HEIGHT
        } else {
            RUNNER_HEIGHT
        };
        self.feet_y - height
    }
}

struct World {
    runner: Runner,
    obstacles: Vec<Body>,
    speed: f64,
    distance: f64,
    frames: u32,
    running: bool,
    crashed: bool,
}

impl World {
    fn new(speed: f64) -> Self {
        Self {
            runner: Runner {
                feet_y: GROUND_Y,
                velocity: 0.0,
                ducking: false,
            },
            obstacles: Vec::new(),
            speed,
            distance: 0.0,
            frames: 0,
            running: false,
            crashed: false,
        }
    }
}

/// A self-contained stand-in for the browser game.
///
/// The world advances in fixed frames according to the shared clock, so
/// polling it more often than once per frame sees the same snapshot, exactly
/// like reading the live game between animation frames.
pub struct SimEnv<C: Clock> {
    settings: SimSettings,
    clock: C,
    rng: StdRng,
    world: World,
    last_frame: Instant,
}

impl<C: Clock> SimEnv<C> {
    pub fn new(settings: SimSettings, clock: C, rng: StdRng) -> Self {
        let last_frame = clock.now();
        Self {
            world: World::new(settings.initial_speed),
            settings,
            clock,
            rng,
            last_frame,
        }
    }
    fn catch_up(&mut self) {
        let now = self.clock.now();
        while self.last_frame + FRAME <= now {
            self.last_frame += FRAME;
            if self.world.running && !self.world.crashed {
                self.frame();
            }
        }
    }
    fn frame(&mut self) {
        let world = &mut self.world;
        world.frames += 1;
        world.speed = (world.speed + self.settings.acceleration).min(self.settings.max_speed);
        world.distance += world.speed;

        let runner = &mut world.runner;
        if !runner.grounded() || runner.velocity > 0.0 {
            let gravity = if runner.ducking { DROP_GRAVITY } else { GRAVITY };
            runner.feet_y -= runner.velocity;
            runner.velocity -= gravity;
            if runner.feet_y >= GROUND_Y {
                runner.feet_y = GROUND_Y;
                runner.velocity = 0.0;
            }
        }

        for body in &mut world.obstacles {
            body.obstacle.x_pos -= world.speed;
        }
        world.obstacles.retain(|body| body.right() > 0.0);
        self.spawn();

        let world = &mut self.world;
        let runner_top = world.runner.top();
        let runner_bottom = world.runner.feet_y;
        world.crashed = world.obstacles.iter().any(|body| {
            body.obstacle.x_pos < RUNNER_X + RUNNER_WIDTH
                && body.right() > RUNNER_X
                && body.obstacle.y_pos < runner_bottom
                && body.bottom() > runner_top
        });
    }
    fn spawn(&mut self) {
        if self.world.frames < CLEAR_FRAMES {
            return;
        }
        let room = match self.world.obstacles.last() {
            Some(last) => last.right() + last.gap < CANVAS_WIDTH,
            None => true,
        };
        if !room {
            return;
        }
        let kind = if self.world.speed >= FLYER_MIN_SPEED && self.rng.gen_bool(0.25) {
            ObstacleKind::Flyer
        } else if self.rng.gen_bool(0.5) {
            ObstacleKind::Small
        } else {
            ObstacleKind::Large
        };
        let shape = shape(kind);
        let y_pos = match kind {
            ObstacleKind::Flyer => FLYER_HEIGHTS[self.rng.gen_range(0..FLYER_HEIGHTS.len())],
            _ => GROUND_Y - shape.height,
        };
        let min_gap = (shape.width * self.world.speed + shape.min_gap * GAP_COEFFICIENT).round();
        let gap = self.rng.gen_range(min_gap..=(min_gap * 1.5).round());
        self.world.obstacles.push(Body {
            obstacle: Obstacle::new(kind, CANVAS_WIDTH, y_pos),
            gap,
        });
    }
}

impl<C: Clock> Environment for SimEnv<C> {
    fn observe(&mut self) -> Result<Observation, EnvError> {
        self.catch_up();
        let world = &self.world;
        Ok(Observation {
            crashed: world.crashed,
            speed: world.speed,
            obstacles: world.obstacles.iter().map(|b| b.obstacle.clone()).collect(),
            distance: world.distance,
        })
    }
    fn issue(&mut self, command: Command) {
        self.catch_up();
        let world = &mut self.world;
        if world.crashed {
            return;
        }
        let runner = &mut world.runner;
        match command {
            Command::Start => world.running = true,
            Command::Jump => {
                if runner.grounded() {
                    runner.ducking = false;
                    runner.velocity = JUMP_VELOCITY;
                }
            }
            // ducking in the air drops the runner faster, like the real game
            Command::Duck => runner.ducking = true,
            Command::Release => runner.ducking = false,
        }
    }
    fn reset(&mut self) -> bool {
        self.world = World::new(self.settings.initial_speed);
        self.last_frame = self.clock.now();
        true
    }
}
