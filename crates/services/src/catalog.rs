//! Built-in seed data: the default course catalog, demo accounts, and
//! initial review/progress records.
//!
//! These collections double as the load-or defaults, so a fresh or reset
//! store always presents a working course.

use chrono::{DateTime, Duration, Utc};

use lms_core::model::{
    ContentId, ContentItem, Course, CourseId, Module, ModuleId, ProgressLedger, QuestionId,
    QuizQuestion, Rating, Review, ReviewFeed, ReviewId, Role, User, UserId,
};
use lms_core::processor::{self, ProgressEvent};

/// The three demo accounts: one per role.
///
/// # Panics
///
/// Panics only if the static account data stops being valid.
#[must_use]
pub fn default_users() -> Vec<User> {
    vec![
        User::new(
            UserId::new("u1"),
            "Alex Student",
            "alex@lms.com",
            Role::Student,
            "https://picsum.photos/200/200?random=1",
            Some(crate::user_service::DEFAULT_PASSWORD.to_owned()),
        )
        .expect("catalog user is valid"),
        User::new(
            UserId::new("m1"),
            "Sarah Mentor",
            "sarah@lms.com",
            Role::Mentor,
            "https://picsum.photos/200/200?random=2",
            Some(crate::user_service::DEFAULT_PASSWORD.to_owned()),
        )
        .expect("catalog user is valid"),
        User::new(
            UserId::new("a1"),
            "Admin User",
            "admin@lms.com",
            Role::Admin,
            "https://picsum.photos/200/200?random=3",
            Some(crate::user_service::DEFAULT_PASSWORD.to_owned()),
        )
        .expect("catalog user is valid"),
    ]
}

fn question(
    id: &str,
    text: &str,
    options: &[&str],
    correct: usize,
) -> QuizQuestion {
    QuizQuestion::new(
        QuestionId::new(id),
        text,
        options.iter().map(|s| (*s).to_owned()).collect(),
        correct,
    )
    .expect("catalog question is valid")
}

fn module(
    id: &str,
    title: &str,
    description: &str,
    estimated_time: &str,
    tags: &[&str],
    contents: Vec<ContentItem>,
) -> Module {
    Module::new(
        ModuleId::new(id),
        title,
        description,
        estimated_time,
        tags.iter().map(|s| (*s).to_owned()).collect(),
        contents,
    )
    .expect("catalog module is valid")
}

/// The default "AI Engineer Career Path" course.
///
/// # Panics
///
/// Panics only if the static catalog data stops being valid.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn default_course() -> Course {
    let m1 = module(
        "m1",
        "Python for AI & Data Preprocessing",
        "Basics of Python, Numpy, Pandas, Matplotlib, Scikit-Learn. Handling missing values, outliers, scaling, and encoding.",
        "2 Weeks",
        &["Basic", "Python", "Preprocessing"],
        vec![
            ContentItem::theory(
                ContentId::new("m1_c1"),
                "Foundations & Resources",
                "Welcome to your journey to becoming an AI Engineer. This module covers the absolute essentials.\n\n\
                 **Key Topics:**\n\
                 1. **Python Basics**: Syntax, loops, functions.\n\
                 2. **Numpy & Pandas**: The engines of data manipulation.\n\
                 3. **Scikit-Learn**: The gold standard for classical ML.\n\n\
                 **Study Resources (Click to open):**\n\
                 https://www.w3schools.com/python/\n\
                 https://numpy.org/doc/stable/user/absolute_beginners.html\n\
                 https://pandas.pydata.org/docs/getting_started/intro_tutorials/index.html",
            ),
            ContentItem::code(
                ContentId::new("m1_c2"),
                "Practice: Cleaning Data",
                "import pandas as pd\nimport numpy as np\nfrom sklearn.preprocessing import StandardScaler\n\n\
                 # Task:\n\
                 # 1. Fill missing 'age' with the mean.\n\
                 # 2. Scale the 'salary' column using StandardScaler.\n\n\
                 def clean_and_scale():\n    # Write your code here\n    pass\n\nclean_and_scale()",
            ),
            ContentItem::quiz(
                ContentId::new("m1_c3"),
                "Preprocessing Knowledge Check",
                "Verify your understanding of data cleaning.",
                vec![
                    question(
                        "q1",
                        "Which technique is best for handling outliers in a dataset that is normally distributed?",
                        &[
                            "Z-Score method",
                            "Removing all data",
                            "Multiplying by zero",
                            "One Hot Encoding",
                        ],
                        0,
                    ),
                    question(
                        "q2",
                        "What does One-Hot Encoding do?",
                        &[
                            "Converts text to lower case",
                            "Converts categorical variables into binary columns",
                            "Removes missing values",
                            "Scales numbers between 0 and 1",
                        ],
                        1,
                    ),
                ],
                Some(70),
            )
            .expect("catalog quiz is valid"),
        ],
    );

    let m2 = module(
        "m2",
        "Project 1: Student Score Predictor",
        "Apply your Python and Data Handling skills to build a simple predictor.",
        "1 Week",
        &["Project", "Basic"],
        vec![
            ContentItem::theory(
                ContentId::new("m2_c1"),
                "Project Brief",
                "**Goal:** Build a simple function that predicts student scores based on hours studied.\n\n\
                 This project validates your ability to handle data structures in Python.",
            ),
            ContentItem::code(
                ContentId::new("m2_c2"),
                "Code Solution",
                "import numpy as np\n\n# Task: write a predictor for score = 10 * hours\ndef predictor(h):\n    return h * 10\n",
            ),
        ],
    );

    let m3 = module(
        "m3",
        "EDA & Visualization",
        "Exploratory Data Analysis on Sales Data using Matplotlib & Seaborn.",
        "1 Week",
        &["Visualization", "Basic-Intermediate"],
        vec![
            ContentItem::theory(
                ContentId::new("m3_c1"),
                "Visualizing Trends",
                "Data Visualization is how we communicate insights.\n\n\
                 **Key Libraries:**\n- **Matplotlib**: Low-level control.\n- **Seaborn**: High-level statistical graphics.",
            ),
            ContentItem::code(
                ContentId::new("m3_c2"),
                "Plotting Exercise",
                "import matplotlib.pyplot as plt\n\n# Task: plot monthly sales as a line chart\n",
            ),
        ],
    );

    let m4 = module(
        "m4",
        "Machine Learning Fundamentals",
        "Supervised vs Unsupervised, Regression, KNN, Trees, Forests, Metrics.",
        "1 Week",
        &["ML", "Intermediate"],
        vec![
            ContentItem::theory(
                ContentId::new("m4_c1"),
                "Core Algorithms",
                "Supervised learning maps inputs to labels; unsupervised learning finds structure.\n\n\
                 Know your metrics: accuracy misleads on imbalanced data, prefer F1.",
            ),
            ContentItem::quiz(
                ContentId::new("m4_c2"),
                "ML Quiz",
                "Check your understanding of ML fundamentals.",
                vec![
                    question(
                        "m4_q1",
                        "Which metric is best for imbalanced classification problems?",
                        &["Accuracy", "F1-Score", "Mean Squared Error", "R-Squared"],
                        1,
                    ),
                    question(
                        "m4_q2",
                        "Random Forest is an example of what technique?",
                        &[
                            "Ensemble Learning (Bagging)",
                            "Boosting",
                            "Clustering",
                            "Dimensionality Reduction",
                        ],
                        0,
                    ),
                ],
                Some(60),
            )
            .expect("catalog quiz is valid"),
        ],
    );

    let m5 = module(
        "m5",
        "Feature Engineering & Model Optimization",
        "Selection, Regularization (L1/L2), GridSearchCV, Hyperparameter Tuning.",
        "2 Weeks",
        &["Optimization", "Intermediate"],
        vec![
            ContentItem::theory(
                ContentId::new("m5_c1"),
                "Refining Models",
                "Good features beat clever models. Regularization trades bias for variance.",
            ),
            ContentItem::code(
                ContentId::new("m5_c2"),
                "Grid Search Implementation",
                "from sklearn.model_selection import GridSearchCV\n\n# Task: tune C and gamma for an SVM\n",
            ),
        ],
    );

    let m6 = module(
        "m6",
        "Project 2: ML Application",
        "Apply ML fundamentals to a dataset (Regression/Classification).",
        "1 Week",
        &["Project", "Intermediate"],
        vec![
            ContentItem::theory(
                ContentId::new("m6_c1"),
                "Project Brief",
                "**Goal:** Train and evaluate a model end-to-end on a real dataset.",
            ),
            ContentItem::code(
                ContentId::new("m6_c2"),
                "Starter Code",
                "from sklearn.linear_model import LinearRegression\n\n# Task: fit, predict, and report metrics\n",
            ),
        ],
    );

    let m7 = module(
        "m7",
        "Deep Learning Basics",
        "Neural Networks (TensorFlow/Keras), Backprop, CNNs basics.",
        "1 Week",
        &["DL", "Intermediate"],
        vec![
            ContentItem::theory(
                ContentId::new("m7_c1"),
                "Neural Networks",
                "Layers of weighted sums and activations, trained by backpropagation.",
            ),
            ContentItem::code(
                ContentId::new("m7_c2"),
                "Keras Model Structure",
                "from tensorflow import keras\n\n# Task: define a two-layer dense network\n",
            ),
        ],
    );

    let m8 = module(
        "m8",
        "NLP & GenAI Intro",
        "Transformers (BERT/GPT), Tokenization, Word2Vec, Prompt Engineering.",
        "2 Weeks",
        &["NLP", "GenAI", "Advanced"],
        vec![
            ContentItem::theory(
                ContentId::new("m8_c1"),
                "Modern NLP",
                "From bag-of-words to attention: how transformers changed language modeling.",
            ),
            ContentItem::quiz(
                ContentId::new("m8_c2"),
                "GenAI Check",
                "Confirm the transformer basics.",
                vec![
                    question(
                        "m8_q1",
                        "What is the main innovation of the Transformer architecture?",
                        &[
                            "Self-Attention Mechanism",
                            "Convolutional Layers",
                            "Recurrent Loops",
                            "Random Forest",
                        ],
                        0,
                    ),
                    question(
                        "m8_q2",
                        "Which is a technique to improve LLM outputs without retraining?",
                        &[
                            "Prompt Engineering / Few-Shot Learning",
                            "Deleting the model",
                            "Changing the GPU",
                            "Using a smaller dataset",
                        ],
                        0,
                    ),
                ],
                Some(60),
            )
            .expect("catalog quiz is valid"),
        ],
    );

    let m9 = module(
        "m9",
        "Project 3: Sentiment Analysis",
        "Customer Segmentation or Sentiment Analysis using simple NLP/DL.",
        "1 Week",
        &["Project", "NLP"],
        vec![ContentItem::code(
            ContentId::new("m9_c1"),
            "Sentiment Logic",
            "# Task: classify review sentiment with a simple keyword or model approach\n",
        )],
    );

    let m10 = module(
        "m10",
        "Advanced DL & Deployment Essentials",
        "RNN/LSTM, Transfer Learning, RAG + Vector DB (FAISS), FastAPI Deployment.",
        "2 Weeks",
        &["Advanced", "Deployment", "RAG"],
        vec![
            ContentItem::theory(
                ContentId::new("m10_c1"),
                "Production AI",
                "Serving a model is software engineering: APIs, retrieval, monitoring.",
            ),
            ContentItem::code(
                ContentId::new("m10_c2"),
                "FastAPI Mock",
                "from fastapi import FastAPI\n\napp = FastAPI()\n\n# Task: expose a /predict endpoint\n",
            ),
        ],
    );

    let m11 = module(
        "m11",
        "Capstone Integration",
        "End-to-end AI system: Data -> Model -> API Deployment.",
        "3 Weeks",
        &["Capstone", "Advanced"],
        vec![ContentItem::theory(
            ContentId::new("m11_c1"),
            "Final Certification Task",
            "Combine everything: ingest data, train a model, and ship it behind an API.",
        )],
    );

    Course::new(
        CourseId::new("c_ai_eng_01"),
        "AI Engineer Career Path",
        "A comprehensive step-by-step guide to becoming an AI Engineer. From Python basics to Deep Learning, GenAI, and MLOps deployment.",
        vec![m1, m2, m3, m4, m5, m6, m7, m8, m9, m10, m11],
    )
}

/// The initial review feed: one five-star review from the demo student,
/// dated a day before `now`.
///
/// # Panics
///
/// Panics only if the static review data stops being valid.
#[must_use]
pub fn default_reviews(now: DateTime<Utc>) -> ReviewFeed {
    ReviewFeed::new(vec![Review::new(
        ReviewId::new("r1"),
        ModuleId::new("m1"),
        UserId::new("u1"),
        "Alex Student",
        Rating::new(5).expect("catalog rating is valid"),
        "The roadmap provided in this course is exactly what I needed. The links to external resources save so much time.",
        now - Duration::days(1),
    )])
}

/// The initial ledger: the demo student mid-way through the first module.
///
/// Derived through the event processor so the seeded entry obeys the same
/// invariants as any live one.
#[must_use]
pub fn default_progress() -> ProgressLedger {
    let course = default_course();
    let mut ledger = ProgressLedger::default();

    if let Some(module) = course.find_module(&ModuleId::new("m1")) {
        let entry = ledger.get(&UserId::new("u1"), module.id());
        let event = ProgressEvent::MarkContentComplete {
            content_id: ContentId::new("m1_c1"),
        };
        ledger.upsert(processor::apply(module, &entry, &event));
    }

    ledger
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use lms_core::model::{ContentKind, ProgressStatus};

    #[test]
    fn catalog_has_eleven_modules() {
        let course = default_course();
        assert_eq!(course.modules().len(), 11);
        assert_eq!(course.id().as_str(), "c_ai_eng_01");
    }

    #[test]
    fn catalog_quizzes_carry_their_passing_scores() {
        let course = default_course();
        let quiz = course
            .find_module(&ModuleId::new("m1"))
            .unwrap()
            .find_content(&ContentId::new("m1_c3"))
            .unwrap();
        assert_eq!(quiz.kind(), ContentKind::Quiz);
        assert_eq!(quiz.passing_score(), 70.0);

        let genai = course
            .find_module(&ModuleId::new("m8"))
            .unwrap()
            .find_content(&ContentId::new("m8_c2"))
            .unwrap();
        assert_eq!(genai.passing_score(), 60.0);
    }

    #[test]
    fn demo_accounts_cover_every_role() {
        let users = default_users();
        assert_eq!(users.len(), 3);
        assert!(users.iter().any(|u| u.role() == Role::Student));
        assert!(users.iter().any(|u| u.role() == Role::Mentor));
        assert!(users.iter().any(|u| u.role() == Role::Admin));
    }

    #[test]
    fn initial_progress_is_in_progress_on_module_one() {
        let ledger = default_progress();
        let entry = ledger.get(&UserId::new("u1"), &ModuleId::new("m1"));
        assert_eq!(entry.status(), ProgressStatus::InProgress);
        assert!(entry.is_content_completed(&ContentId::new("m1_c1")));
    }

    #[test]
    fn initial_review_predates_now() {
        let now = lms_core::time::fixed_now();
        let feed = default_reviews(now);
        assert_eq!(feed.reviews().len(), 1);
        assert!(feed.reviews()[0].created_at() < now);
    }
}
