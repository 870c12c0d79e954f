//! Deterministic answer text for student query results

use super::{CourseStats, Student};

pub fn count_answer(count: i64, course: Option<&str>) -> String {
    let noun = if count == 1 { "student" } else { "students" };
    let verb = if count == 1 { "is" } else { "are" };

    match course {
        Some(course) => format!("There {} {} {} enrolled in {}.", verb, count, noun, course),
        None => format!("There {} {} {} enrolled.", verb, count, noun),
    }
}

pub fn list_answer(students: &[Student], course: Option<&str>) -> String {
    if students.is_empty() {
        return match course {
            Some(course) => format!("No students are enrolled in {}.", course),
            None => "No students are enrolled.".to_string(),
        };
    }

    let header = match course {
        Some(course) => format!("Students enrolled in {}:", course),
        None => "Students:".to_string(),
    };

    let lines: Vec<String> = students.iter().map(student_line).collect();
    format!("{}\n{}", header, lines.join("\n"))
}

pub fn name_answer(students: &[Student], name: &str) -> String {
    if students.is_empty() {
        return format!("No student named {} was found.", name);
    }

    let lines: Vec<String> = students.iter().map(student_line).collect();
    format!("Students matching '{}':\n{}", name, lines.join("\n"))
}

pub fn student_answer(student: Option<&Student>, user_id: i32) -> String {
    match student {
        Some(s) => format!(
            "Student {} is {}, age {}, enrolled in {}.",
            s.user_id, s.name, s.age, s.course
        ),
        None => format!("No student with id {} was found.", user_id),
    }
}

pub fn average_age_answer(average: Option<f64>, course: Option<&str>) -> String {
    match (average, course) {
        (Some(avg), Some(course)) => {
            format!("The average age of students in {} is {:.1}.", course, avg)
        }
        (Some(avg), None) => format!("The average age of students is {:.1}.", avg),
        (None, Some(course)) => format!("No students are enrolled in {}.", course),
        (None, None) => "No students are enrolled.".to_string(),
    }
}

pub fn statistics_answer(stats: &[CourseStats]) -> String {
    if stats.is_empty() {
        return "No students are enrolled.".to_string();
    }

    let lines: Vec<String> = stats
        .iter()
        .map(|s| {
            format!(
                "- {}: {} students, average age {:.1}",
                s.course, s.student_count, s.average_age
            )
        })
        .collect();

    format!("Enrollment by course:\n{}", lines.join("\n"))
}

fn student_line(student: &Student) -> String {
    format!(
        "- #{} {} (age {}, {})",
        student.user_id, student.name, student.age, student.course
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Student {
        Student {
            user_id: 1,
            name: "Alice".to_string(),
            age: 21,
            course: "Python".to_string(),
        }
    }

    #[test]
    fn test_count_answer() {
        assert_eq!(count_answer(150, None), "There are 150 students enrolled.");
        assert_eq!(count_answer(1, None), "There is 1 student enrolled.");
        assert_eq!(
            count_answer(3, Some("python")),
            "There are 3 students enrolled in python."
        );
    }

    #[test]
    fn test_list_answer() {
        assert_eq!(
            list_answer(&[alice()], None),
            "Students:\n- #1 Alice (age 21, Python)"
        );
        assert_eq!(list_answer(&[], Some("rust")), "No students are enrolled in rust.");
    }

    #[test]
    fn test_student_answer() {
        assert_eq!(
            student_answer(Some(&alice()), 1),
            "Student 1 is Alice, age 21, enrolled in Python."
        );
        assert_eq!(student_answer(None, 9), "No student with id 9 was found.");
    }

    #[test]
    fn test_average_age_answer() {
        assert_eq!(
            average_age_answer(Some(21.5), None),
            "The average age of students is 21.5."
        );
    }

    #[test]
    fn test_statistics_answer() {
        let stats = vec![CourseStats {
            course: "Python".to_string(),
            student_count: 2,
            average_age: 22.0,
        }];

        assert_eq!(
            statistics_answer(&stats),
            "Enrollment by course:\n- Python: 2 students, average age 22.0"
        );
    }
}
