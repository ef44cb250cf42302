// prose-bridge/bridge-core
//
// Copyright: 2023, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use minidom::Element;
use tracing::{debug, info, warn};
use xmpp_parsers::presence::Presence;

use bridge_xmpp::stanza::{MucUser, PresenceStanzaExt, StatusCode};

use crate::presence::models::{Ban, Kick, PresenceChange, PresenceDelta, PresenceStatus};
use crate::presence::{
    DirectOccupantResolver, GatewayOccupantResolver, OccupantResolver, PresenceStore,
};
use crate::BridgeMode;

/// Holds the presence of the occupants of one bridged room (or one gateway session) and
/// computes what each incoming presence changed.
pub struct PresenceCache {
    resolver: Box<dyn OccupantResolver>,
    store: PresenceStore,
}

impl PresenceCache {
    pub fn new(resolver: impl OccupantResolver + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            store: PresenceStore::new(),
        }
    }

    pub fn direct() -> Self {
        Self::new(DirectOccupantResolver)
    }

    pub fn gateway() -> Self {
        Self::new(GatewayOccupantResolver)
    }

    pub fn for_mode(mode: BridgeMode) -> Self {
        match mode {
            BridgeMode::Direct => Self::direct(),
            BridgeMode::Gateway => Self::gateway(),
        }
    }
}

impl PresenceCache {
    pub fn clear(&mut self) {
        info!("Clearing presence of {} occupants", self.store.len());
        self.store.clear()
    }

    /// Returns the status stored for `jid`. If there is none, falls back to the first occupant
    /// (in order of appearance) whose JID starts with `jid`, which allows looking up an occupant by
    /// its bare JID. With more than one resource sharing that prefix the returned occupant is
    /// whichever was seen first; use `statuses_matching` to see all of them.
    pub fn get_status(&self, jid: &str) -> Option<&PresenceStatus> {
        self.store
            .get(jid)
            .or_else(|| self.store.first_with_prefix(jid))
    }

    /// Returns all occupants whose JID starts with `prefix`, in order of appearance.
    pub fn statuses_matching<'a>(&'a self, prefix: &'a str) -> Vec<(&'a str, &'a PresenceStatus)> {
        self.store.all_with_prefix(prefix).collect()
    }

    /// Overwrites the status for `jid` without computing a delta.
    pub fn modify_status(&mut self, jid: impl Into<String>, status: PresenceStatus) {
        self.store.replace(jid, status)
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn add_presence(&mut self, presence: Presence) -> Option<PresenceDelta> {
        self.add(&Element::from(presence))
    }

    /// Processes a `<presence/>` stanza and returns what it changed. Returns `None` if the
    /// presence can't be attributed to an occupant.
    ///
    /// Entries are written back to the store when
    /// - the occupant was already known (the entry is updated in place), or
    /// - the presence is our own reflected presence, or
    /// - the delta carries a status snapshot.
    ///
    /// So an occupant seen for the first time in an `unavailable` presence isn't tracked.
    pub fn add(&mut self, stanza: &Element) -> Option<PresenceDelta> {
        if let Some(error) = stanza.presence_error() {
            return Some(if error.is_conflict {
                PresenceDelta::conflict()
            } else {
                PresenceDelta::other_error(error.raw)
            });
        }

        let occupant = match self.resolver.resolve_occupant(stanza) {
            Ok(occupant) => occupant,
            Err(err) => {
                debug!("Ignoring presence. {}", err);
                return None;
            }
        };

        let muc_user = stanza.muc_user().unwrap_or_else(|err| {
            warn!("Ignoring malformed MUC payload. {}", err);
            None
        });
        let has_status = |code: StatusCode| {
            muc_user
                .as_ref()
                .map(|user| user.has_status(code))
                .unwrap_or(false)
        };

        let is_self = has_status(StatusCode::SelfPresence);
        let is_ban = has_status(StatusCode::SelfBanned);
        let is_kick = muc_user
            .as_ref()
            .map(|user| user.status.iter().any(|code| code.is_kick()))
            .unwrap_or(false);
        let is_technical_removal = has_status(StatusCode::SelfKickedTechnical);

        let key = occupant.jid.to_string();
        let (mut entry, is_new) = match self.store.get(&key) {
            Some(entry) => (entry.clone(), false),
            None => (self.resolver.new_status(&occupant), true),
        };
        let mut is_tracked = !is_new;
        let mut has_snapshot = false;
        let mut delta = PresenceDelta::new(is_self);

        if let Some(device) = occupant.device {
            if entry.insert_device(device) {
                delta.push(PresenceChange::NewDevice);
            }
        }

        if is_new {
            delta.push(PresenceChange::New);
        } else if let Some(nick) = &occupant.nick {
            // The cached nick is left as is, consumers decide whether to adopt the new one.
            if entry.nick.as_ref() != Some(nick) {
                delta.push(PresenceChange::NewNick);
            }
        }

        if is_self {
            entry.ours = true;
            self.store.put(key.clone(), entry.clone());
            is_tracked = true;
        }

        let item = muc_user.as_ref().and_then(|user: &MucUser| user.item.as_ref());

        if let Some(item) = item {
            if item.affiliation != entry.affiliation {
                delta.push(PresenceChange::Affiliation);
            }
            if item.role != entry.role {
                delta.push(PresenceChange::Role);
            }
            entry.affiliation = item.affiliation.clone();
            entry.role = item.role.clone();
        }

        if stanza.is_unavailable() {
            if entry.online {
                entry.online = false;
                entry.status = stanza.status_text().unwrap_or_default();
                has_snapshot = true;
                delta.push(PresenceChange::Offline);
            }
        } else if !entry.online || is_self {
            entry.online = true;
            has_snapshot = true;
            delta.push(PresenceChange::Online);
        }

        if is_ban {
            delta.push(PresenceChange::Ban);
            if let Some(item) = item {
                entry.ban = Some(Ban {
                    reason: item.reason.clone(),
                    banner: item.actor_nick().map(ToString::to_string),
                });
            }
        }

        if is_kick {
            delta.push(PresenceChange::Kick);
            if let Some(item) = item {
                entry.kick = Some(Kick {
                    reason: item.reason.clone(),
                    kicker: item.actor_nick().map(ToString::to_string),
                    technical: is_technical_removal,
                });
            }
        }

        match stanza.vcard_update() {
            Ok(Some(update)) if update.photo != entry.photo_id => {
                entry.photo_id = update.photo;
                has_snapshot = true;
                delta.push(PresenceChange::Photo);
            }
            Ok(_) => (),
            Err(err) => warn!("Ignoring malformed vCard update. {}", err),
        }

        if has_snapshot {
            delta.status = Some(entry.clone());
        }

        if is_tracked || has_snapshot {
            self.store.put(key.as_str(), entry);
        }

        debug!(occupant = %key, changed = ?delta.changed, "Processed presence");

        Some(delta)
    }
}
