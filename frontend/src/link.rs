use js_sys::Date;
use linkfeed::{Link, LinkId};
use timeago::Formatter;
use yew::{function_component, html, use_state, Callback, Html, Properties};
use yew_hooks::use_interval;

#[derive(Properties, PartialEq)]
pub struct LinkItemProps {
    pub link: Link,
    pub index: usize,
    pub authenticated: bool,
    pub vote: Callback<LinkId>,
}

fn get_now() -> u64 {
    (Date::now() / 1000.0) as u64
}

fn created(link: &Link) -> Option<u64> {
    let millis = Date::parse(link.created_at.as_deref()?);

    (!millis.is_nan()).then_some((millis / 1000.0) as u64)
}

#[function_component(LinkItem)]
pub fn link_item(props: &LinkItemProps) -> Html {
    let formatter = Formatter::new();
    let now = use_state(get_now);

    {
        let now = now.clone();
        use_interval(
            move || {
                now.set(get_now());
            },
            60 * 1000,
        );
    }

    let link = &props.link;
    let ago = created(link).map(|time| {
        formatter.convert(std::time::Duration::from_secs(now.saturating_sub(time)))
    });

    let onclick = {
        let id = link.id.clone();
        let vote = props.vote.clone();
        Callback::from(move |_| vote.emit(id.clone()))
    };

    html! {
      <li class="link">
        <span class="index">{props.index}{"."}</span>
        if props.authenticated {
          <button class="upvote" title="upvote" onclick={onclick}>{"▲"}</button>
        }
        <span class="details">
          <span class="description">
            {&link.description}
            {" ("}<a href={link.url.clone()} target="_blank">{&link.url}</a>{")"}
          </span>
          <span class="meta">
            {link.votes.len()}{" votes | by "}{link.author()}
            if let Some(ago) = ago {
              {" "}{ago}
            }
          </span>
        </span>
      </li>
    }
}
