//! In-place orderings for workout lists.
//!
//! All sorts are stable, so rows with equal keys keep the order the
//! repository returned them in.

use crate::{CardioWorkout, StrengthWorkout, Workout, WorkoutCommon};

pub fn sort_by_calories_asc<T: AsRef<WorkoutCommon>>(list: &mut [T]) {
    list.sort_by_key(|w| w.as_ref().calories_burned);
}

pub fn sort_by_calories_desc<T: AsRef<WorkoutCommon>>(list: &mut [T]) {
    list.sort_by(|a, b| b.as_ref().calories_burned.cmp(&a.as_ref().calories_burned));
}

pub fn sort_by_duration_asc<T: AsRef<WorkoutCommon>>(list: &mut [T]) {
    list.sort_by_key(|w| w.as_ref().duration_minutes);
}

pub fn sort_by_duration_desc<T: AsRef<WorkoutCommon>>(list: &mut [T]) {
    list.sort_by(|a, b| b.as_ref().duration_minutes.cmp(&a.as_ref().duration_minutes));
}

pub fn sort_by_name_asc<T: AsRef<WorkoutCommon>>(list: &mut [T]) {
    list.sort_by(|a, b| a.as_ref().name.cmp(&b.as_ref().name));
}

pub fn sort_by_distance_asc(list: &mut [CardioWorkout]) {
    list.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}

pub fn sort_by_weight_desc(list: &mut [StrengthWorkout]) {
    list.sort_by(|a, b| b.weight_kg.total_cmp(&a.weight_kg));
}

pub fn sort_by_intensity_desc(list: &mut [Workout]) {
    list.sort_by(|a, b| b.intensity().total_cmp(&a.intensity()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cardio() -> Vec<CardioWorkout> {
        vec![
            CardioWorkout::new("Morning Running", 30, 300, 5.0, 145),
            CardioWorkout::new("Evening Cycling", 45, 400, 15.0, 130),
            CardioWorkout::new("Swimming", 40, 350, 2.0, 120),
        ]
    }

    fn names<T: AsRef<WorkoutCommon>>(list: &[T]) -> Vec<&str> {
        list.iter().map(|w| w.as_ref().name.as_str()).collect()
    }

    #[test]
    fn test_sort_by_calories() {
        let mut list = cardio();
        sort_by_calories_desc(&mut list);
        assert_eq!(names(&list), ["Evening Cycling", "Swimming", "Morning Running"]);

        sort_by_calories_asc(&mut list);
        assert_eq!(names(&list), ["Morning Running", "Swimming", "Evening Cycling"]);
    }

    #[test]
    fn test_sort_by_duration() {
        let mut list = cardio();
        sort_by_duration_asc(&mut list);
        assert_eq!(names(&list), ["Morning Running", "Swimming", "Evening Cycling"]);

        sort_by_duration_desc(&mut list);
        assert_eq!(names(&list), ["Evening Cycling", "Swimming", "Morning Running"]);
    }

    #[test]
    fn test_sort_by_name_and_distance() {
        let mut list = cardio();
        sort_by_name_asc(&mut list);
        assert_eq!(names(&list), ["Evening Cycling", "Morning Running", "Swimming"]);

        sort_by_distance_asc(&mut list);
        assert_eq!(names(&list), ["Swimming", "Morning Running", "Evening Cycling"]);
    }

    #[test]
    fn test_sort_by_weight_desc_is_stable() {
        let mut list = vec![
            StrengthWorkout::new("Bench Press", 20, 150, 4, 10, 60.0),
            StrengthWorkout::new("Squats", 25, 200, 5, 12, 80.0),
            StrengthWorkout::new("Rows", 15, 120, 3, 10, 60.0),
        ];
        sort_by_weight_desc(&mut list);
        assert_eq!(names(&list), ["Squats", "Bench Press", "Rows"]);
    }

    #[test]
    fn test_sort_mixed_workouts_by_intensity() {
        let mut list: Vec<Workout> = vec![
            CardioWorkout::new("Swimming", 40, 350, 2.0, 120).into(),
            StrengthWorkout::new("Bench Press", 20, 150, 4, 10, 60.0).into(),
            CardioWorkout::new("Evening Cycling", 45, 400, 15.0, 130).into(),
        ];
        sort_by_intensity_desc(&mut list);
        // 120.0, 43.33, 6.0
        assert_eq!(names(&list), ["Bench Press", "Evening Cycling", "Swimming"]);
    }
}
