use crate::{Effect, FeedAdapter, FeedRequest, Msg, ParamError};

/// Pure update function: applies a message to an adapter and returns any effects.
pub fn update(mut adapter: FeedAdapter, msg: Msg) -> (FeedAdapter, Vec<Effect>) {
    let effects = match msg {
        Msg::ParamsChanged(params) => {
            let validated = if params.kind() == adapter.kind() {
                params.validate()
            } else {
                Err(ParamError::WrongFeed {
                    expected: adapter.kind(),
                    got: params.kind(),
                })
            };
            match validated {
                // Unchanged inputs keep the current cycle, whatever its state.
                Ok(request) if adapter.current_request() == Some(&request) => Vec::new(),
                Ok(request) => vec![start(&mut adapter, request)],
                Err(err) => {
                    adapter.reject(err.to_string());
                    Vec::new()
                }
            }
        }
        Msg::Reload => match adapter.current_request().cloned() {
            Some(request) => vec![start(&mut adapter, request)],
            None => Vec::new(),
        },
        Msg::Resolved { tag, result } => {
            adapter.resolve(tag, result);
            Vec::new()
        }
    };

    (adapter, effects)
}

fn start(adapter: &mut FeedAdapter, request: FeedRequest) -> Effect {
    let tag = adapter.begin(request.clone());
    Effect::Fetch {
        feed: adapter.kind(),
        tag,
        request,
    }
}
