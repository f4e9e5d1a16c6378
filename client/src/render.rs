//! Text output for the console.

use common::model::average::{Average, NO_RATINGS};
use common::model::module::ModuleInstanceSummary;
use common::model::professor::ProfessorRating;

const RULE_WIDTH: usize = 80;

/// `count` stars; negative counts render as none.
pub fn stars(count: i64) -> String {
    "*".repeat(usize::try_from(count).unwrap_or(0))
}

pub fn module_table(modules: &[ModuleInstanceSummary]) -> String {
    if modules.is_empty() {
        return "No modules found.\n".to_string();
    }

    let rule = format!("{}\n", "-".repeat(RULE_WIDTH));
    let mut out = format!(
        "{:<5} {:<30} {:<6} {:<8} Taught by\n",
        "Code", "Name", "Year", "Semester"
    );
    out.push_str(&rule);
    for module in modules {
        let taught_by = if module.professors.is_empty() {
            "None".to_string()
        } else {
            module.professors.join(", ")
        };
        out.push_str(&format!(
            "{:<5} {:<30} {:<6} {:<8} {}\n",
            module.module_code, module.module_name, module.year, module.semester, taught_by
        ));
        out.push_str(&rule);
    }
    out
}

/// One line per professor, the average shown as whole stars (truncated).
pub fn professor_ratings(ratings: &[ProfessorRating]) -> String {
    if ratings.is_empty() {
        return "No ratings available.\n".to_string();
    }

    let mut out = String::from("Professor Ratings:\n");
    for professor in ratings {
        let shown = match professor.rating {
            Average::Rated(value) => stars(value.trunc() as i64),
            Average::NoRatings => NO_RATINGS.to_string(),
        };
        out.push_str(&format!(
            "The rating of {} ({}) is {}\n",
            professor.name, professor.professor_id, shown
        ));
    }
    out
}

pub fn module_average(professor_id: &str, module_code: &str, average: Average<i64>) -> String {
    let shown = match average {
        Average::Rated(value) => stars(value),
        Average::NoRatings => NO_RATINGS.to_string(),
    };
    format!("The rating of Professor {professor_id} in module {module_code} is {shown}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_every_instance() {
        let modules = vec![
            ModuleInstanceSummary {
                module_code: "CD1".to_string(),
                module_name: "Computing for Dummies".to_string(),
                year: 2017,
                semester: 1,
                professors: vec!["J. Excellent".to_string(), "V. Smart".to_string()],
            },
            ModuleInstanceSummary {
                module_code: "PG1".to_string(),
                module_name: "Programming for the Gifted".to_string(),
                year: 2018,
                semester: 2,
                professors: vec![],
            },
        ];
        let table = module_table(&modules);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Code  Name"));
        assert!(lines[0].ends_with("Taught by"));
        assert_eq!(
            lines[2],
            format!(
                "{:<5} {:<30} {:<6} {:<8} J. Excellent, V. Smart",
                "CD1", "Computing for Dummies", 2017, 1
            )
        );
        assert!(lines[4].ends_with(" None"));
    }

    #[test]
    fn empty_table() {
        assert_eq!(module_table(&[]), "No modules found.\n");
    }

    #[test]
    fn stars_are_truncated() {
        let ratings = vec![
            ProfessorRating {
                professor_id: "JE1".to_string(),
                name: "J. Excellent".to_string(),
                rating: Average::Rated(4.5),
            },
            ProfessorRating {
                professor_id: "TT1".to_string(),
                name: "T. Terrible".to_string(),
                rating: Average::Rated(1.9),
            },
        ];
        assert_eq!(
            professor_ratings(&ratings),
            "Professor Ratings:\n\
             The rating of J. Excellent (JE1) is ****\n\
             The rating of T. Terrible (TT1) is *\n"
        );
    }

    #[test]
    fn module_average_text() {
        assert_eq!(
            module_average("JE1", "CD1", Average::Rated(3)),
            "The rating of Professor JE1 in module CD1 is ***"
        );
        assert_eq!(
            module_average("JE1", "CD1", Average::NoRatings),
            "The rating of Professor JE1 in module CD1 is No ratings yet"
        );
        assert_eq!(stars(-2), "");
    }
}
