//! Builds the per-endpoint response shapes from loaded rows.

use common::{
    AccountResponse, ArtistAccount, CandidateProfile, EventDetail, EventFeedback, EventPublic,
    EventView, EventWithOwner, FeedbackResponse, LineupSlot, OwnerAccount, Role, UserSummary,
};
use model::entities::user;
use workflow::{EventSnapshot, FeedbackSnapshot};

pub fn account_response(user: user::Model) -> AccountResponse {
    let role = Role::from(user.role);
    match role {
        Role::Owner => AccountResponse::Owner(OwnerAccount {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
        }),
        Role::Artist => AccountResponse::Artist(ArtistAccount {
            id: user.id,
            username: user.username,
            email: user.email,
            role,
            phone: user.phone,
            solo: user.solo,
            hour_price: user.hour_price,
        }),
    }
}

pub fn user_summary(user: &user::Model) -> UserSummary {
    UserSummary {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
    }
}

fn candidate_profile(user: &user::Model) -> CandidateProfile {
    CandidateProfile {
        id: user.id,
        username: user.username.clone(),
        phone: user.phone.clone(),
        solo: user.solo,
        hour_price: user.hour_price,
    }
}

pub fn event_public(snapshot: &EventSnapshot) -> EventPublic {
    let event = &snapshot.event;
    EventPublic {
        id: event.id,
        datetime: event.datetime,
        repeat_event: event.repeat_event.into(),
        details: event.details.clone(),
        base_price: event.base_price,
        address: snapshot.address.clone().into(),
        music_styles: snapshot
            .music_styles
            .iter()
            .cloned()
            .map(Into::into)
            .collect(),
    }
}

/// Owner view: public fields plus lineup and pending candidatures.
pub fn event_detail(snapshot: &EventSnapshot) -> EventDetail {
    let public = event_public(snapshot);
    EventDetail {
        id: public.id,
        datetime: public.datetime,
        repeat_event: public.repeat_event,
        details: public.details,
        base_price: public.base_price,
        address: public.address,
        music_styles: public.music_styles,
        lineup: snapshot
            .lineup
            .iter()
            .map(|slot| LineupSlot {
                artist: slot.artist_id,
                performance_datetime: slot.performance_datetime,
            })
            .collect(),
        candidatures: snapshot.candidates.iter().map(candidate_profile).collect(),
    }
}

/// Detail for the event's owner, public for everyone else.
pub fn event_view(snapshot: &EventSnapshot, viewer: &user::Model) -> EventView {
    if snapshot.is_owned_by(viewer) {
        EventView::Detail(event_detail(snapshot))
    } else {
        EventView::Public(event_public(snapshot))
    }
}

pub fn event_with_owner(snapshot: &EventSnapshot) -> EventWithOwner {
    let public = event_public(snapshot);
    EventWithOwner {
        id: public.id,
        datetime: public.datetime,
        repeat_event: public.repeat_event,
        details: public.details,
        base_price: public.base_price,
        address: public.address,
        music_styles: public.music_styles,
        owner: user_summary(&snapshot.owner),
    }
}

pub fn feedback_response(snapshot: &FeedbackSnapshot) -> FeedbackResponse {
    FeedbackResponse {
        id: snapshot.feedback.id,
        description: snapshot.feedback.description.clone(),
        stars: snapshot.feedback.stars,
        event: event_with_owner(&snapshot.event),
        from_user: user_summary(&snapshot.from_user),
        addressed_user: user_summary(&snapshot.addressed_user),
    }
}

pub fn event_feedback(snapshot: &FeedbackSnapshot) -> EventFeedback {
    EventFeedback {
        id: snapshot.feedback.id,
        description: snapshot.feedback.description.clone(),
        stars: snapshot.feedback.stars,
        event: event_with_owner(&snapshot.event),
    }
}
