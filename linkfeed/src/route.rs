use crate::{
    config::Config,
    graphql::{Direction, FeedVariables, OrderBy},
};

const NEW_SEGMENT: &str = "new";

/// which feed a path selects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedRoute {
    /// ranked by votes, no pagination
    Top,
    /// chronological, `page` is `None` when the trailing segment is not a
    /// positive number
    New { page: Option<u32> },
}

impl FeedRoute {
    pub fn from_path(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if !segments.contains(&NEW_SEGMENT) {
            return FeedRoute::Top;
        }

        let page = segments
            .last()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|page| *page > 0);

        FeedRoute::New { page }
    }

    pub fn is_paginated(&self) -> bool {
        matches!(self, FeedRoute::New { .. })
    }

    pub fn page(&self) -> u32 {
        match self {
            FeedRoute::New { page } => page.unwrap_or(1),
            FeedRoute::Top => 1,
        }
    }

    /// index of the first item on this page
    pub fn page_start(&self, page_size: usize) -> usize {
        match self {
            FeedRoute::New { page: Some(page) } => {
                (*page as usize - 1).saturating_mul(page_size)
            }
            _ => 0,
        }
    }

    pub fn variables(&self, config: &Config) -> FeedVariables {
        let order_by = OrderBy {
            created_at: Direction::Desc,
        };

        match self {
            FeedRoute::New { .. } => FeedVariables {
                take: config.page_size,
                skip: self.page_start(config.page_size),
                order_by,
            },
            FeedRoute::Top => FeedVariables {
                take: config.top_limit,
                skip: 0,
                order_by,
            },
        }
    }

    pub fn previous(&self) -> Option<FeedRoute> {
        match self {
            FeedRoute::New { .. } if self.page() > 1 => Some(FeedRoute::New {
                page: Some(self.page() - 1),
            }),
            _ => None,
        }
    }

    /// the next page exists while `page <= count / page_size`
    pub fn next(&self, count: usize, page_size: usize) -> Option<FeedRoute> {
        let shown = (self.page() as usize).saturating_mul(page_size);

        match self {
            FeedRoute::New { .. } if shown <= count => self
                .page()
                .checked_add(1)
                .map(|page| FeedRoute::New { page: Some(page) }),
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            FeedRoute::Top => "/top".to_owned(),
            FeedRoute::New { page: None } => format!("/{NEW_SEGMENT}"),
            FeedRoute::New { page: Some(page) } => format!("/{NEW_SEGMENT}/{page}"),
        }
    }
}
