//! A minute of duck hunting without a window. Sweeps the aim across the sky and
//! fires whenever the gun is ready, printing the score as it changes.

use std::cell::RefCell;
use std::rc::Rc;

use duck_hunt::{
    Aim, BirdModel, Color, InstanceQueue, Meadow, MeadowConfig, Part, QueuedShape, ShapeId,
    SimConfig, Simulation,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const FPS: f32 = 60.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = Simulation::with_seed(SimConfig::duck_hunt().spawn_chance(0.02), 2024)?;
    let mut meadow = Meadow::new(&MeadowConfig::default(), &mut StdRng::seed_from_u64(2024))?;

    let queue = Rc::new(RefCell::new(InstanceQueue::new()));
    let shape = |id| QueuedShape::new(ShapeId(id), queue.clone());
    let mut bird = BirdModel::uniform(
        [shape(0), shape(1), shape(2), shape(3), shape(4), shape(5)],
        Color::hex(0x8b5a2b),
    );
    let mut bullet = Part::new(shape(6), Color::BLACK);
    let mut grass = shape(7);

    let mut score = 0;
    for frame in 0..(60 * FPS as u64) {
        let t = frame as f32 / FPS;
        let aim = Aim::new((t * 0.7).sin() * 30.0, 7.5 + (t * 1.3).sin() * 6.0);

        sim.request_shoot();
        sim.tick(t, aim);
        if sim.birds_hit() != score {
            score = sim.birds_hit();
            println!("[{t:6.2}s] Birds Hit: {score}");
        }

        meadow.update(frame, t);
        queue.borrow_mut().clear();
        sim.draw(&mut bird, &mut bullet);
        meadow.draw(&mut grass);

        if frame % (10 * FPS as u64) == 0 {
            println!(
                "[{t:6.2}s] birds {} / projectiles {} / instances {} ({} bytes)",
                sim.bird_count(),
                sim.projectile_count(),
                queue.borrow().len(),
                queue.borrow().as_bytes().len(),
            );
        }

        if sim.lose_condition_reached() {
            println!("[{t:6.2}s] Out of ammo");
            break;
        }
    }

    println!("Birds Hit: {}", sim.birds_hit());
    match sim.ammo_remaining() {
        Some(ammo) => println!("Bullets Left: {ammo}"),
        None => println!("Bullets Left: unlimited"),
    }
    Ok(())
}
