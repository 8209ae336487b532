use tracing::{event, Level};

use crate::{
    route::FeedRoute,
    types::{Link, Vote},
};

/// links as last fetched from the server, plus whatever the live updates
/// merged in since
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Feed {
    links: Vec<Link>,
    count: usize,
}

impl Feed {
    pub fn new(links: Vec<Link>) -> Self {
        let count = links.len();

        Feed { links, count }
    }

    /// a fetched page, the links before it count towards the total
    pub fn for_page(links: Vec<Link>, route: &FeedRoute, page_size: usize) -> Self {
        let count = route.page_start(page_size).saturating_add(links.len());

        Feed { links, count }
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// running count: links up to the end of the fetched page plus merged
    /// live links
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// put a freshly created link in front, links already present are ignored
    pub fn merge_new_link(&mut self, link: Link) -> bool {
        if self.links.iter().any(|l| l.id == link.id) {
            event!(Level::DEBUG, "link {} already in feed", link.id);
            return false;
        }

        self.links.insert(0, link);
        self.count += 1;

        true
    }

    /// record a vote on the link it references
    pub fn apply_vote(&mut self, vote: Vote) -> bool {
        let Some(link_id) = vote.link.as_ref().map(|l| l.id.clone()) else {
            return false;
        };

        match self.links.iter_mut().find(|l| l.id == link_id) {
            Some(link) if !link.votes.contains(&vote) => {
                link.votes.push(vote);
                true
            }
            Some(_) => false,
            None => {
                event!(Level::DEBUG, "vote for link {link_id} outside the feed");
                false
            }
        }
    }

    /// the links in display order, each paired with its 1-based position
    pub fn render(&self, route: &FeedRoute, page_size: usize) -> Vec<(usize, &Link)> {
        let links: Vec<&Link> = match route {
            FeedRoute::New { .. } => self.links.iter().collect(),
            FeedRoute::Top => ranked(&self.links),
        };
        let start = route.page_start(page_size);

        links
            .into_iter()
            .enumerate()
            .map(|(index, link)| (start + index + 1, link))
            .collect()
    }
}

/// most voted first, equal counts keep their server order
pub fn ranked(links: &[Link]) -> Vec<&Link> {
    let mut ranked: Vec<&Link> = links.iter().collect();
    ranked.sort_by(|a, b| b.votes.len().cmp(&a.votes.len()));

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LinkRef, UserRef, Votes};
    use fake::{
        faker::{internet::en::Username, lorem::en::Sentence},
        Fake,
    };
    use rand::Rng;

    fn link(id: usize, votes: usize) -> Link {
        Link {
            id: id.to_string(),
            url: format!("https://example.com/{id}"),
            description: Sentence(3..8).fake(),
            posted_by: Some(UserRef {
                id: "1".into(),
                username: Some(Username().fake()),
                name: None,
            }),
            votes: Votes::from(
                (0..votes)
                    .map(|v| Vote {
                        id: Some(format!("{id}-{v}")),
                        ..Default::default()
                    })
                    .collect::<Vec<_>>(),
            ),
            created_at: None,
        }
    }

    fn vote(link_id: &str, user_id: &str) -> Vote {
        Vote {
            id: None,
            user: Some(UserRef {
                id: user_id.into(),
                ..Default::default()
            }),
            link: Some(LinkRef {
                id: link_id.into(),
            }),
        }
    }

    #[test]
    fn ranking_is_stable() {
        let mut rng = rand::rng();

        for _ in 0..20 {
            let links: Vec<Link> = (0..40).map(|id| link(id, rng.random_range(0..4))).collect();
            let ranked = ranked(&links);

            assert_eq!(ranked.len(), links.len());
            for pair in ranked.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!(a.votes.len() >= b.votes.len());
                if a.votes.len() == b.votes.len() {
                    let position = |l: &Link| links.iter().position(|x| x.id == l.id);
                    assert!(position(a) < position(b));
                }
            }
        }
    }

    #[test]
    fn ranking_example() {
        let links = vec![link(1, 0), link(2, 3), link(3, 1), link(4, 3)];
        let ids: Vec<&str> = ranked(&links).iter().map(|l| l.id.as_str()).collect();

        assert_eq!(ids, vec!["2", "4", "3", "1"]);
    }

    #[test]
    fn merge_new_link() {
        let mut feed = Feed::new(vec![link(1, 0), link(2, 0)]);

        assert!(feed.merge_new_link(link(3, 0)));
        assert_eq!(feed.count(), 3);
        assert_eq!(feed.links()[0].id, "3");
    }

    #[test]
    fn merge_duplicate_is_ignored() {
        let mut feed = Feed::new(vec![link(1, 0), link(2, 0)]);
        let before = feed.clone();

        assert!(!feed.merge_new_link(link(2, 5)));
        assert_eq!(feed, before);
        assert_eq!(feed.count(), 2);
    }

    #[test]
    fn full_later_pages_lead_on() {
        let links = |n: usize| (0..n).map(|id| link(id, 0)).collect::<Vec<_>>();

        let second = FeedRoute::New { page: Some(2) };
        let feed = Feed::for_page(links(10), &second, 10);
        assert_eq!(feed.count(), 20);
        assert_eq!(
            second.next(feed.count(), 10),
            Some(FeedRoute::New { page: Some(3) })
        );

        let partial = Feed::for_page(links(4), &second, 10);
        assert_eq!(second.next(partial.count(), 10), None);

        let first = Feed::for_page(links(10), &FeedRoute::New { page: None }, 10);
        assert_eq!(first.count(), 10);
        assert_eq!(Feed::for_page(links(3), &FeedRoute::Top, 10).count(), 3);
    }

    #[test]
    fn apply_vote() {
        let mut feed = Feed::new(vec![link(1, 0), link(2, 1)]);

        assert!(feed.apply_vote(vote("2", "u1")));
        assert_eq!(feed.links()[1].votes.len(), 2);

        // same voter twice
        assert!(!feed.apply_vote(vote("2", "u1")));
        assert!(!feed.apply_vote(vote("9", "u1")));
        assert!(!feed.apply_vote(Vote::default()));
        assert_eq!(feed.links()[1].votes.len(), 2);
    }

    #[test]
    fn render_new_page() {
        let feed = Feed::new(vec![link(1, 0), link(2, 4), link(3, 1)]);
        let rendered = feed.render(&FeedRoute::New { page: Some(3) }, 10);
        let indexed: Vec<(usize, &str)> = rendered.iter().map(|(i, l)| (*i, l.id.as_str())).collect();

        assert_eq!(indexed, vec![(21, "1"), (22, "2"), (23, "3")]);
    }

    #[test]
    fn render_top() {
        let feed = Feed::new(vec![link(1, 0), link(2, 4), link(3, 1)]);
        let rendered = feed.render(&FeedRoute::Top, 10);
        let indexed: Vec<(usize, &str)> = rendered.iter().map(|(i, l)| (*i, l.id.as_str())).collect();

        assert_eq!(indexed, vec![(1, "2"), (2, "3"), (3, "1")]);
        // the underlying data keeps server order
        assert_eq!(feed.links()[0].id, "1");
    }
}
