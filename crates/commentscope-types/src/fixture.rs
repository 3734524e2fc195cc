use chrono::NaiveDate;

use crate::report::{AnalysisReport, BasicInfo, Category, TemporalPoint};

pub(crate) fn sample_report() -> AnalysisReport {
    AnalysisReport {
        basic_info: BasicInfo {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: "The Future of Artificial Intelligence in 2025".to_string(),
            channel_name: "Tech Insights".to_string(),
            thumbnail_url:
                "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800&q=80"
                    .to_string(),
            total_comments: 8547,
            video_duration: "24:35".to_string(),
            published_date: NaiveDate::from_ymd_opt(2022, 3, 15).unwrap_or_default(),
            published_ago: "2 years ago".to_string(),
            main_topic_summary: "This video explores the rapid advancement of artificial \
                intelligence, discussing machine learning breakthroughs, ethical \
                considerations, and the impact on various industries including healthcare, \
                finance, and creative work."
                .to_string(),
        },
        temporal_data: vec![
            TemporalPoint::new("2022 Q2", 1250, 1250),
            TemporalPoint::new("2022 Q3", 2890, 1640),
            TemporalPoint::new("2022 Q4", 4120, 1230),
            TemporalPoint::new("2023 Q1", 5340, 1220),
            TemporalPoint::new("2023 Q2", 6580, 1240),
            TemporalPoint::new("2023 Q3", 7420, 840),
            TemporalPoint::new("2023 Q4", 7980, 560),
            TemporalPoint::new("2024 Q1", 8547, 567),
        ],
        categories: vec![
            Category::new("Positive Feedback", 32.5, 2778)
                .with_description("Viewers praising the depth and clarity of the video")
                .with_samples([
                    "Best breakdown of where AI is heading that I've seen this year.",
                    "The healthcare section alone was worth the watch.",
                ]),
            Category::new("Questions & Discussion", 21.3, 1820)
                .with_description("Follow-up questions and threads debating specific claims")
                .with_samples([
                    "How do you think regulation will keep up with this pace?",
                    "Would love a follow-up on AI in education.",
                ]),
            Category::new("Technical Insights", 16.8, 1436)
                .with_description("Commenters adding technical detail on models and training")
                .with_samples([
                    "Worth noting that most of these gains came from scaling data, not architecture.",
                    "The part on transformers skips over retrieval-augmented approaches.",
                ]),
            Category::new("Ethical Concerns", 12.4, 1060)
                .with_description("Worries about jobs, bias, privacy and misuse")
                .with_samples([
                    "Nobody is talking about what happens to creative jobs.",
                    "Bias in training data is still the elephant in the room.",
                ]),
            Category::new("Future Predictions", 10.2, 872)
                .with_description("Speculation about what AI will look like in the next decade")
                .with_samples([
                    "Coming back to this in 2030 to see how much of it aged well.",
                    "General-purpose assistants will be everywhere within five years.",
                ]),
            Category::new("Off-topic", 6.8, 581)
                .with_description("Jokes, greetings and comments unrelated to the video topic")
                .with_samples(["Who else is watching this at 3am?", "First!"]),
        ],
    }
}
