//! Grade/topic taxonomy shared by the generation route and the quiz client.
//!
//! Every grade owns an ordered topic list (the first entry is the grade's default).
//! The cross-grade core skills and `mixed` are accepted for any grade.

use serde::Serialize;

use crate::domain::Level;

pub const MIXED: &str = "mixed";

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Topic {
    pub value: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Grade {
    pub value: &'static str,
    pub label: &'static str,
    pub topics: &'static [Topic],
}

impl Grade {
    pub fn level(&self) -> Level {
        level_for_grade(self.value)
    }

    pub fn first_topic(&self) -> Option<&'static Topic> {
        self.topics.first()
    }

    /// Topic after `current` in this grade, wrapping. Unknown topics restart at the first one.
    pub fn next_topic(&self, current: &str) -> Option<&'static Topic> {
        if self.topics.is_empty() {
            return None;
        }
        let next = match self.topics.iter().position(|t| t.value == current) {
            Some(i) => (i + 1) % self.topics.len(),
            None => 0,
        };
        self.topics.get(next)
    }
}

const fn t(value: &'static str, label: &'static str, description: &'static str) -> Topic {
    Topic { value, label, description }
}

/// First grade in `GRADES` whose level is `hard`.
const HARD_FROM: &str = "4";

pub static GRADES: &[Grade] = &[
    Grade {
        value: "nursery",
        label: "Nursery",
        topics: &[
            t("nursery-counting-10", "Counting 1-10", "Count objects and numbers from 1 to 10."),
            t("nursery-shapes", "Basic shapes", "Identify circles, squares, and triangles."),
            t("nursery-colors", "Colors and sorting", "Sort and group by color and simple categories."),
            t("nursery-size", "Big vs small", "Compare simple sizes and quantities."),
        ],
    },
    Grade {
        value: "kg1",
        label: "KG 1",
        topics: &[
            t("kg1-count-20", "Counting 1-20", "Count and recognize numbers 1-20."),
            t("kg1-compare", "Comparing quantities", "More/less/same with objects up to 20."),
            t("kg1-patterns", "Simple patterns", "Continue and create AB/ABC patterns."),
            t("kg1-shapes", "2D shapes", "Name and find basic shapes in the environment."),
            t("kg1-position", "Position words", "Use in, on, under, above to describe position."),
            t("kg1-measure", "Compare size/weight", "Long/short, heavy/light, holds more/less."),
            t("kg1-add-sub", "Add/Subtract with objects", "Add or remove small sets with counters."),
        ],
    },
    Grade {
        value: "kg2",
        label: "KG 2",
        topics: &[
            t("kg2-count-50", "Counting 1-50", "Count, read, and write numbers to 50."),
            t("kg2-recognition", "Number recognition", "Identify and order numbers to 50."),
            t("kg2-compare", "Compare numbers", "Use greater/less/equal up to 50."),
            t("kg2-patterns", "Patterns", "Extend and build patterns with shapes and numbers."),
            t("kg2-shapes", "Shapes & position", "Identify 2D shapes and position words."),
            t("kg2-measure", "Length/weight/capacity", "Compare everyday objects by size or weight."),
            t("kg2-add-sub-objects", "Add/Subtract objects", "Add and subtract small quantities with visuals."),
        ],
    },
    Grade {
        value: "kg",
        label: "KG",
        topics: &[
            t("kg-count-20", "Counting 1-20", "Count objects and numbers from 1 to 20."),
            t("kg-recognition", "Number recognition", "Identify numbers 0-20 and their order."),
            t("kg-compare", "Comparing quantities", "Use more/less/equal for small sets."),
            t("kg-patterns", "Patterns", "Complete and create simple patterns."),
            t("kg-shapes", "Basic shapes", "Recognize 2D shapes and describe position words."),
            t("kg-measure", "Compare measures", "Compare length, weight, and capacity informally."),
            t("kg-add-sub", "Simple add/subtract", "Use objects to add or subtract small numbers."),
        ],
    },
    Grade {
        value: "1",
        label: "Grade 1",
        topics: &[
            t("g1-numbers-100", "Numbers 0-100", "Read, write, and order numbers to 100."),
            t("g1-place-value", "Place value (tens/ones)", "Understand tens and ones."),
            t("g1-skip", "Skip counting", "Count by 2s, 5s, 10s."),
            t("g1-compare", "Comparing numbers", "Use <, >, = up to 100."),
            t("g1-ordinal", "Ordinal numbers", "Use 1st through 10th."),
            t("g1-add-sub-20", "Add/Subtract within 20", "Basic facts within 20."),
            t("g1-add-sub-100", "Add/Subtract within 100", "No regrouping."),
            t("g1-word-problems", "Word problems", "Single-step addition/subtraction situations."),
            t("g1-time", "Time", "Tell time to hour/half-hour."),
            t("g1-money", "Money basics", "Identify simple coins/notes."),
            t("g1-measure", "Length/weight/capacity", "Intro comparisons and units."),
            t("g1-shapes", "2D & 3D shapes", "Name and sort shapes."),
            t("g1-symmetry", "Basic symmetry", "Identify simple lines of symmetry."),
        ],
    },
    Grade {
        value: "2",
        label: "Grade 2",
        topics: &[
            t("g2-numbers-1000", "Numbers to 1000", "Read, write, and order to 1000."),
            t("g2-place-value", "Place value (HTO)", "Hundreds, tens, ones."),
            t("g2-odd-even", "Odd and even", "Identify odd/even numbers."),
            t("g2-expanded-order", "Expanded form & ordering", "Expand and compare numbers."),
            t("g2-add-sub-regroup", "Add/Sub with regrouping", "Carry/borrow within 1000."),
            t("g2-multiply-tables", "Basic multiplication tables", "2,3,4,5,10 tables."),
            t("g2-division-sharing", "Early division", "Sharing and grouping."),
            t("g2-fractions", "Fractions", "1/2, 1/3, 1/4 basics."),
            t("g2-time-5min", "Time to 5 minutes", "Read clocks to nearest 5 minutes."),
            t("g2-measure", "Measurement", "cm, m, g, kg, ml, L."),
            t("g2-angles", "Angles intro", "Recognize corners and turns."),
            t("g2-graphs", "Pictographs & bar graphs", "Read simple graphs."),
        ],
    },
    Grade {
        value: "3",
        label: "Grade 3",
        topics: &[
            t("g3-numbers-10000", "Numbers to 10,000", "Read, write, round to 10s/100s."),
            t("g3-roman", "Roman numerals", "Basic Roman numerals."),
            t("g3-multiply-2x1", "Multiply 2-digit by 1-digit", "Structured multiplication."),
            t("g3-sub-borrow", "Long subtraction", "Subtraction with borrowing."),
            t("g3-division-1digit", "Division 2-3 digits", "Divide by 1 digit."),
            t("g3-fractions-eq", "Equivalent fractions", "Identify and compare fractions."),
            t("g3-fractions-compare", "Compare fractions", "Order and compare fractions."),
            t("g3-fraction-line", "Fraction number line", "Place fractions on a line."),
            t("g3-perimeter-area", "Perimeter & area", "Basics for rectangles."),
            t("g3-angles-types", "Types of angles", "Right, acute, obtuse basics."),
            t("g3-lines", "Parallel & perpendicular", "Identify line relationships."),
            t("g3-graphs", "Bar & tally graphs", "Read and create simple graphs."),
        ],
    },
    Grade {
        value: "4",
        label: "Grade 4",
        topics: &[
            t("g4-numbers-1m", "Numbers to 1,000,000", "Read, write, and compare."),
            t("g4-factors-multiples", "Factors & multiples", "Find factors and multiples."),
            t("g4-prime-composite", "Prime & composite", "Classify numbers."),
            t("g4-lcm-hcf", "LCM & HCF", "Least common multiple, highest common factor."),
            t("g4-multiply-2x2", "Multiply 2-digit by 2-digit", "Long multiplication."),
            t("g4-long-division", "Long division", "4-digit divided by 1-digit."),
            t("g4-fractions-like", "Fractions add/sub like", "Add/subtract like denominators."),
            t("g4-decimals", "Decimals tenths/hundredths", "Read and compare decimals."),
            t("g4-frac-decimal", "Fraction to decimal", "Convert simple fractions."),
            t("g4-area-perimeter", "Area & perimeter", "Rectangles and squares."),
            t("g4-polygons", "Triangles & quadrilaterals", "Classify shapes."),
            t("g4-coordinate", "Coordinate grid", "Plot points in first quadrant."),
            t("g4-line-graphs", "Line graphs", "Read and interpret line graphs."),
        ],
    },
    Grade {
        value: "5",
        label: "Grade 5",
        topics: &[
            t("g5-numbers-millions", "Numbers to millions", "Read, write, and round big numbers."),
            t("g5-decimals", "Decimals to thousandths", "Place value and rounding decimals."),
            t("g5-multiply-multi", "Multi-digit multiplication", "Larger products."),
            t("g5-long-division-2digit", "Long division 2-digit divisor", "Divide by 2-digit numbers."),
            t("g5-order-ops", "Order of operations", "BODMAS/PEMDAS basics."),
            t("g5-fractions-unlike", "Fractions unlike denoms", "Add/subtract unlike fractions."),
            t("g5-mixed-improper", "Mixed & improper", "Convert and operate."),
            t("g5-multiply-fractions", "Multiply fractions", "Products of fractions."),
            t("g5-percentages", "Percentages", "Basic percent calculations."),
            t("g5-geometry", "Area/perimeter composite", "Composite shapes and volume intro."),
            t("g5-coordinate", "Coordinate geometry", "First quadrant plotting."),
            t("g5-stats", "Mean/median/mode", "Basic statistics."),
            t("g5-probability", "Probability basics", "Simple chance events."),
        ],
    },
    Grade {
        value: "6",
        label: "Grade 6",
        topics: &[
            t("g6-integers", "Integers", "Order and operate with integers."),
            t("g6-rational", "Rational numbers", "Compare and operate with rationals."),
            t("g6-ratios", "Ratios & proportion", "Solve ratio problems."),
            t("g6-percent", "Percentages", "Increase/decrease and applications."),
            t("g6-algebra", "Algebraic expressions", "Simplify expressions."),
            t("g6-equations", "One-step equations", "Solve simple equations/inequalities."),
            t("g6-geometry", "Polygons & triangles", "Properties and angle sums."),
            t("g6-area", "Area triangles/parallelograms", "Compute areas."),
            t("g6-circles", "Circumference", "Circle basics."),
            t("g6-nets", "Nets of 3D shapes", "Visualize nets and solids."),
            t("g6-data", "Histograms & pie charts", "Read/interpret charts."),
            t("g6-probability", "Probability", "Simple probability events."),
            t("g6-sets", "Sets & Venn", "Basic set notation and Venn diagrams."),
        ],
    },
];

/// Skills that are valid at every grade, independent of the grade's own list.
pub static CORE_SKILLS: &[Topic] = &[
    t("inwords", "In-words (1–800)", "Write numbers between 1 and 800 in words, paying attention to hundreds, tens, and ones."),
    t("draw-hands", "Draw hands to show time", "Draw analog clock hands for times shown in hours or five-minute increments, helping kids visualize time."),
    t("write-time", "Write/read the time", "Read digital or analog times and write them in words or numbers, using whole hours and quarter hours."),
    t("mental-maths", "Mental maths", "Solve mental addition, subtraction, and quick number facts without paper, keeping numbers small."),
    t("fractions", "Fractions", "Recognize whole, half, quarter, three-quarters, and other simple fractional parts of shapes or sets."),
    t("even-odd", "Even and odd", "Identify or separate even and odd numbers within simple ranges."),
    t("fill-blanks", "Number fill in the blanks", "Complete sequences or missing numbers in patterns, ramps, and number lines."),
    t("order", "Ascending & descending order", "Arrange numbers from smallest to largest or largest to smallest, including mixed two- and three-digit numbers."),
    t("dodging-table", "Dodging table (skip counting)", "Skip count by 2s, 5s, or 10s to fill in missing numbers or keep counting along a path."),
    t("comparison", "Greater than / smaller than", "Compare two numbers and say which is greater, smaller, or if they are equal using symbols or words."),
    t("multiply", "Multiplication of 2 digits by 1 digit", "Multiply a two-digit number by a one-digit number, showing the product clearly."),
    t("circle-number", "Circle smallest / largest number", "Pick and circle the smallest or largest number from a group of numbers."),
    t("borrowing", "2-digit borrowing subtraction", "Subtract two-digit numbers that require borrowing from the tens place."),
    t("addition", "2-digit addition", "Add two-digit numbers, sometimes carrying into the tens place."),
];

pub static MIXED_TOPIC: Topic = t(
    MIXED,
    "Mixed (mix of all topics)",
    "Blend the grade's topics so each question can target a different skill area.",
);

pub fn grade(value: &str) -> Option<&'static Grade> {
    GRADES.iter().find(|g| g.value == value)
}

/// Position of the grade in the progression order.
pub fn grade_index(value: &str) -> Option<usize> {
    GRADES.iter().position(|g| g.value == value)
}

/// The grade after `value`, saturating at the last grade.
pub fn next_grade(value: &str) -> Option<&'static Grade> {
    let idx = grade_index(value)?;
    GRADES.get((idx + 1).min(GRADES.len() - 1))
}

pub fn level_for_grade(value: &str) -> Level {
    match (grade_index(value), grade_index(HARD_FROM)) {
        (Some(g), Some(cutoff)) if g >= cutoff => Level::Hard,
        _ => Level::Easy,
    }
}

/// Resolve a topic id for a grade: the grade's own topics, then core skills, then `mixed`.
pub fn topic_for(grade: &Grade, topic: &str) -> Option<&'static Topic> {
    grade
        .topics
        .iter()
        .chain(CORE_SKILLS.iter())
        .find(|t| t.value == topic)
        .or_else(|| (topic == MIXED).then_some(&MIXED_TOPIC))
}

/// Display label for a question `type`, falling back to the raw id.
pub fn type_label(kind: &str) -> &str {
    GRADES
        .iter()
        .flat_map(|g| g.topics.iter())
        .chain(CORE_SKILLS.iter())
        .find(|t| t.value == kind)
        .map(|t| t.label)
        .unwrap_or(kind)
}
