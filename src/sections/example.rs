use serde_json::json;

use crate::sections::validate::VideoRequest;

/// A complete five-section sample request covering the common slide kinds.
pub fn example_request() -> VideoRequest {
    VideoRequest {
        title: Some("Sample Video".to_owned()),
        sections: vec![
            json!({
                "type": "title",
                "title": "Amazing AI Breakthrough",
                "subtitle": "Revolutionary Technology",
                "duration": 5
            }),
            json!({
                "type": "problem_statement",
                "title": "Current Challenges",
                "points": [
                    "Slow processing speed",
                    "High operational costs",
                    "Limited accuracy"
                ],
                "description": "Today's AI systems face significant limitations",
                "duration": 10
            }),
            json!({
                "type": "solution",
                "title": "Our Innovation",
                "content": "Introducing next-generation AI that solves these problems",
                "features": [
                    "10x faster processing",
                    "90% cost reduction",
                    "99% accuracy"
                ],
                "duration": 10
            }),
            json!({
                "type": "results",
                "title": "Impressive Results",
                "results": [
                    {"metric": "Speed Improvement", "value": "10x faster", "icon": "🚀"},
                    {"metric": "Cost Reduction", "value": "90%", "icon": "💰"},
                    {"metric": "Accuracy", "value": "99%", "icon": "🎯"}
                ],
                "duration": 8
            }),
            json!({
                "type": "conclusion",
                "title": "The Future is Here",
                "content": "Join us in revolutionizing AI technology for everyone",
                "callToAction": "Get Started Today",
                "duration": 5
            }),
        ],
    }
}
