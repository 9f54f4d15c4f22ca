//! Repository layer
//!
//! One repository per entity family. Each exposes live subscriptions for
//! screens and one-shot reads and mutations, delegating to its DAO.

pub mod exercises;
pub mod measurements;
pub mod plans;
pub mod workouts;

pub use exercises::ExerciseRepository;
pub use measurements::BodyMeasurementRepository;
pub use plans::WorkoutPlanRepository;
pub use workouts::WorkoutRepository;

use std::sync::Arc;

use crate::storage::Database;

/// All repositories over one database handle
#[derive(Debug, Clone)]
pub struct Repositories {
    pub exercises: ExerciseRepository,
    pub workouts: WorkoutRepository,
    pub plans: WorkoutPlanRepository,
    pub measurements: BodyMeasurementRepository,
}

impl Repositories {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            exercises: ExerciseRepository::new(db.clone()),
            workouts: WorkoutRepository::new(db.clone()),
            plans: WorkoutPlanRepository::new(db.clone()),
            measurements: BodyMeasurementRepository::new(db),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, Workout, WorkoutExercise};
    use chrono::Utc;

    #[test]
    fn test_repositories_share_one_store() {
        let repos = Repositories::new(Arc::new(Database::open_in_memory().unwrap()));

        let squat = repos.exercises.insert(&Exercise::new("Squat", true)).unwrap();
        let workout = repos.workouts.insert(&Workout::new("Legs", Utc::now())).unwrap();
        repos
            .workouts
            .insert_workout_exercise(&WorkoutExercise::new(workout, squat, 0))
            .unwrap();

        let detail = repos.workouts.get_with_exercises(workout).unwrap().unwrap();
        assert_eq!(detail.workout_exercises[0].exercise.name, "Squat");
    }

    #[test]
    fn test_subscription_through_repository() {
        let repos = Repositories::new(Arc::new(Database::open_in_memory().unwrap()));
        let mut active = repos.exercises.watch_all_active();
        assert!(active.current().unwrap().is_empty());

        let id = repos.exercises.insert(&Exercise::new("Dip", false)).unwrap();
        assert_eq!(active.poll().unwrap().unwrap().len(), 1);

        repos.exercises.deactivate(id).unwrap();
        assert!(active.poll().unwrap().unwrap().is_empty());
    }

    #[test]
    fn test_search_one_shot_and_live() {
        let repos = Repositories::new(Arc::new(Database::open_in_memory().unwrap()));
        repos.exercises.insert(&Exercise::new("Bench Press", true)).unwrap();

        assert_eq!(repos.exercises.search("press").unwrap().len(), 1);

        let mut live = repos.exercises.watch_search("press");
        assert_eq!(live.current().unwrap().len(), 1);

        repos.exercises.insert(&Exercise::new("Leg Press", true)).unwrap();
        assert_eq!(live.poll().unwrap().unwrap().len(), 2);
        assert_eq!(repos.exercises.search("PRESS").unwrap().len(), 2);
    }
}
