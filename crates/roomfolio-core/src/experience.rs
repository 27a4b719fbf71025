//! Work history shown on the monitor carousel

use serde::{Deserialize, Serialize};

/// What an experience link points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Product,
    Company,
    Client,
}

impl LinkKind {
    /// Heading rendered above the link
    pub fn heading(self) -> &'static str {
        match self {
            LinkKind::Product => "Link to product:",
            LinkKind::Company => "Link to company website:",
            LinkKind::Client => "Link to client website:",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceLink {
    pub kind: LinkKind,
    pub url: String,
}

/// One slide of the carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub client: String,
    pub location: String,
    pub duration: String,
    pub achievements: Vec<String>,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub links: Vec<ExperienceLink>,
}

impl WorkExperience {
    /// Links in display order: product, company, client
    pub fn sorted_links(&self) -> Vec<&ExperienceLink> {
        let mut links: Vec<&ExperienceLink> = self.links.iter().collect();
        links.sort_by_key(|link| link.kind);
        links
    }
}

const KATALYST_STACK: &[&str] = &[
    "React.js",
    "Vue.js",
    "Java",
    "Node.js",
    "Next.js",
    "Apache Kafka",
    "Spring Boot",
    "DataHub",
    "Superset",
    "PowerBI",
    "Dremio",
    "Apache Ranger",
    "Airflow",
    "NiFi",
    "Oracle",
];

const HCMC: &str = "Ho Chi Minh City, Vietnam";
const KATALYST_TENURE: &str = "Jul 2022 - Dec 2024";
const FULL_STACK: &str = "Full-Stack Software Engineer";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn link(kind: LinkKind, url: &str) -> ExperienceLink {
    ExperienceLink {
        kind,
        url: url.to_string(),
    }
}

fn katalyst(id: u32, client: &str, achievements: &[&str], links: Vec<ExperienceLink>) -> WorkExperience {
    WorkExperience {
        id,
        title: FULL_STACK.to_string(),
        company: "KATALYST".to_string(),
        client: client.to_string(),
        location: HCMC.to_string(),
        duration: KATALYST_TENURE.to_string(),
        achievements: strings(achievements),
        technologies: strings(KATALYST_STACK),
        links,
    }
}

/// The full work history, newest first
pub fn work_history() -> Vec<WorkExperience> {
    vec![
        katalyst(
            1,
            "KATALYST",
            &[
                "Engineered and implemented a data portal called HANAS to streamline data processing solutions, enhancing pipeline efficiency and centralizing data services for improved performance",
                "Developed the HANAS platform UI using React.js and Java, integrating backend services including DataHub, Superset/PowerBI, Dremio, Apache Ranger, and Airflow/NiFi, boosting engineer productivity by 40%",
            ],
            vec![link(LinkKind::Product, "https://katalyst.vn/solutions/hanas-data-platform")],
        ),
        katalyst(
            2,
            "RockitFitness",
            &[
                "Applied Vue.js framework to design and deploy RockitFitness management system, leveraging Node.js for backend services and automating 80% of daily management tasks",
                "Collaborated with supervisors to devise innovative solutions that enhanced code readability and boosted execution speed by 10%",
            ],
            vec![link(LinkKind::Client, "https://rock-it.fit/en")],
        ),
        katalyst(
            3,
            "Electricity of Vietnam",
            &[
                "Built and optimized the backend of a high-throughput messaging stream system for EVN (Electricity of Vietnam) using Next.js and Apache Kafka",
            ],
            vec![link(LinkKind::Client, "https://en.evn.com.vn/")],
        ),
        katalyst(
            4,
            "Nam A Bank",
            &[
                "Implemented secure Host-to-Host integration on Nam A Bank's SSO 2.0 with CIC, enabling SSO access and real-time credit data exchange using Java Spring Boot",
            ],
            vec![link(LinkKind::Client, "https://www.namabank.com.vn/")],
        ),
        WorkExperience {
            id: 5,
            title: "Intern Business Analyst".to_string(),
            company: "SVTech".to_string(),
            client: "SVTech".to_string(),
            location: HCMC.to_string(),
            duration: "Mar 2022 - Jun 2022".to_string(),
            achievements: strings(&[
                "Collaborated with customers to gather, evaluate, and refine business requirements, reducing misaligned feature requests by 60%.",
                "Designed and delivered an interactive Figma demo to guide developers through the implementation process.",
                "Presented and demonstrated the final product to both management and clients, ensuring alignment and satisfaction.",
                "Collaborated in reviewing and analyzing epics, features, and user stories.",
            ]),
            technologies: strings(&[
                "Figma",
                "Business Analysis",
                "Requirements Gathering",
                "User Stories",
                "Agile Methodology",
            ]),
            links: vec![link(LinkKind::Company, "https://www.svtech.com/")],
        },
    ]
}

/// Carousel position over a fixed number of slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Carousel {
    index: usize,
    len: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move to the next slide, wrapping to the first
    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    /// Move to the previous slide, wrapping to the last
    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }

    /// Jump to a slide via its indicator. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    /// The slide under the cursor
    pub fn current<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        items.get(self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_history_table() {
        let history = work_history();
        assert_eq!(history.len(), 5);

        let ids: Vec<u32> = history.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        assert_eq!(history[2].client, "Electricity of Vietnam");
        assert_eq!(history[4].title, "Intern Business Analyst");
        assert_eq!(history[4].achievements.len(), 4);
        assert_eq!(history[0].technologies.len(), 15);
        assert!(history.iter().all(|e| !e.achievements.is_empty()));
    }

    #[test]
    fn test_link_kinds() {
        let history = work_history();
        assert_eq!(history[0].links[0].kind, LinkKind::Product);
        assert_eq!(history[3].links[0].kind, LinkKind::Client);
        assert_eq!(history[4].links[0].kind, LinkKind::Company);
        assert_eq!(LinkKind::Company.heading(), "Link to company website:");
    }

    #[test]
    fn test_sorted_links() {
        let mut experience = work_history().remove(0);
        experience.links = vec![
            link(LinkKind::Client, "https://client.example"),
            link(LinkKind::Product, "https://product.example"),
            link(LinkKind::Company, "https://company.example"),
        ];
        let kinds: Vec<LinkKind> = experience.sorted_links().iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LinkKind::Product, LinkKind::Company, LinkKind::Client]);
    }

    #[test]
    fn test_carousel_wraps() {
        let mut carousel = Carousel::new(5);
        carousel.prev();
        assert_eq!(carousel.index(), 4);
        carousel.next();
        assert_eq!(carousel.index(), 0);
        for _ in 0..7 {
            carousel.next();
        }
        assert_eq!(carousel.index(), 2);
    }

    #[test]
    fn test_carousel_select() {
        let history = work_history();
        let mut carousel = Carousel::new(history.len());
        carousel.select(3);
        assert_eq!(carousel.current(&history).map(|e| e.id), Some(4));

        carousel.select(9);
        assert_eq!(carousel.index(), 3);
    }

    #[test]
    fn test_empty_carousel() {
        let mut carousel = Carousel::new(0);
        carousel.next();
        carousel.prev();
        carousel.select(0);
        assert!(carousel.is_empty());
        assert_eq!(carousel.current::<WorkExperience>(&[]), None);
    }

    #[test]
    fn test_experience_json() {
        let json = serde_json::to_value(&work_history()[1]).unwrap();
        assert_eq!(json["client"], "RockitFitness");
        assert_eq!(json["links"][0]["kind"], "client");
    }
}
