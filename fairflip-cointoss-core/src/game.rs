use fairflip_core::{
    commit::{self, CommitmentError, Decommitment},
    flip::{combine_all, Draw, DrawError, MIN_PLAYERS},
    Hash, Secret,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::CointossConfig;

/// A game error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum GameError {
    #[error("a game needs at least 2 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("game is full")]
    Full,
    #[error("commitment was already submitted by {0:?}")]
    AlreadyJoined(PlayerId),
    #[error("game has not started, {0} seats are open")]
    NotStarted(usize),
    #[error("unknown player {0:?}")]
    UnknownPlayer(PlayerId),
    #[error("{0:?} has already revealed")]
    AlreadyRevealed(PlayerId),
    #[error("{0} players have not revealed")]
    PendingReveals(usize),
    #[error("commitment error: {0}")]
    Commitment(#[from] CommitmentError),
    #[error("draw error: {0}")]
    Draw(#[from] DrawError),
}

impl GameError {
    /// Returns `true` if a player's reveal did not open its commitment.
    pub fn is_cheating(&self) -> bool {
        matches!(self, Self::Commitment(CommitmentError::Mismatch))
    }
}

/// The seat of a player in a [`Game`], in join order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerId(usize);

impl PlayerId {
    /// Returns the index of the player's seat.
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Seat {
    commitment: Hash,
    reveal: Option<Secret>,
}

/// A commit-reveal draw among a fixed number of players.
///
/// Players join with a commitment until every seat is taken, then each one
/// reveals. Once all reveals are in, [`Game::settle`] XORs the secrets and
/// selects the winner by reducing their hash modulo the player count.
#[derive(Debug)]
pub struct Game {
    config: CointossConfig,
    max_players: usize,
    seats: Vec<Seat>,
}

impl Game {
    /// Creates a new game for `max_players` players.
    pub fn new(max_players: usize) -> Result<Self, GameError> {
        Self::new_with_config(CointossConfig::default(), max_players)
    }

    /// Creates a new game for `max_players` players with the provided
    /// configuration.
    pub fn new_with_config(config: CointossConfig, max_players: usize) -> Result<Self, GameError> {
        if max_players < MIN_PLAYERS {
            return Err(GameError::InvalidPlayerCount(max_players));
        }

        Ok(Self {
            config,
            max_players,
            seats: Vec::with_capacity(max_players),
        })
    }

    /// Returns the number of seats.
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// Returns the number of players who have joined.
    pub fn players(&self) -> usize {
        self.seats.len()
    }

    /// Returns `true` if every seat is taken.
    pub fn is_full(&self) -> bool {
        self.seats.len() == self.max_players
    }

    /// Returns the commitment of `player`, if it has joined.
    pub fn commitment(&self, player: PlayerId) -> Option<&Hash> {
        self.seats.get(player.0).map(|seat| &seat.commitment)
    }

    /// Returns `true` if `player` has revealed its secret.
    pub fn has_revealed(&self, player: PlayerId) -> bool {
        matches!(self.seats.get(player.0), Some(seat) if seat.reveal.is_some())
    }

    /// Joins the game with a commitment, returning the player's seat.
    ///
    /// A repeated commitment is rejected: a player who copies another's
    /// commitment and then its reveal would cancel that secret out of the XOR.
    pub fn join(&mut self, commitment: Hash) -> Result<PlayerId, GameError> {
        commit::check(&commitment)?;

        if self.is_full() {
            return Err(GameError::Full);
        }

        if let Some(index) = self
            .seats
            .iter()
            .position(|seat| seat.commitment == commitment)
        {
            return Err(GameError::AlreadyJoined(PlayerId(index)));
        }

        let player = PlayerId(self.seats.len());
        self.seats.push(Seat {
            commitment,
            reveal: None,
        });

        debug!(player = player.0, %commitment, "player joined");

        Ok(player)
    }

    /// Reveals `player`'s secret.
    ///
    /// Reveals are only accepted once every seat is taken.
    pub fn reveal(&mut self, player: PlayerId, secret: Secret) -> Result<(), GameError> {
        if !self.is_full() {
            return Err(GameError::NotStarted(self.max_players - self.seats.len()));
        }

        let overlong = self.config.overlong();
        let seat = self
            .seats
            .get_mut(player.0)
            .ok_or(GameError::UnknownPlayer(player))?;

        if seat.reveal.is_some() {
            return Err(GameError::AlreadyRevealed(player));
        }

        let decommitment = Decommitment::new(secret);
        if let Err(err) = decommitment.verify(&seat.commitment) {
            warn!(
                player = player.0,
                commitment = %seat.commitment,
                revealed = %decommitment.commit(),
                "reveal does not open the player's commitment"
            );
            return Err(err.into());
        }

        decommitment
            .data()
            .pad(overlong)
            .map_err(DrawError::from)?;

        seat.reveal = Some(decommitment.data().clone());

        debug!(player = player.0, "player revealed");

        Ok(())
    }

    /// Settles the game once every player has revealed.
    pub fn settle(&self) -> Result<Draw, GameError> {
        let pending = self.max_players
            - self
                .seats
                .iter()
                .filter(|seat| seat.reveal.is_some())
                .count();
        if pending > 0 {
            return Err(GameError::PendingReveals(pending));
        }

        let overlong = self.config.overlong();
        let padded = self
            .seats
            .iter()
            .filter_map(|seat| seat.reveal.as_ref())
            .map(|secret| secret.pad(overlong))
            .collect::<Result<Vec<_>, _>>()
            .map_err(DrawError::from)?;

        let draw = Draw::from_combined(&combine_all(&padded), self.max_players)?;

        debug!(hash = %draw.hash(), winner = draw.winner(), "game settled");

        Ok(draw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fairflip_core::{commit::HashCommit, secret::SecretError};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::*;

    fn word(last: u8) -> Secret {
        let mut bytes = [0u8; 32];
        bytes[31] = last;
        Secret::new(bytes)
    }

    fn full_game(secrets: &[Secret]) -> (Game, Vec<PlayerId>) {
        let mut game = Game::new(secrets.len()).unwrap();
        let players = secrets
            .iter()
            .map(|secret| game.join(commit::commit(secret.as_ref())).unwrap())
            .collect();

        (game, players)
    }

    #[rstest]
    #[case::zero(0)]
    #[case::one(1)]
    fn test_invalid_player_count(#[case] max_players: usize) {
        assert!(matches!(
            Game::new(max_players).unwrap_err(),
            GameError::InvalidPlayerCount(n) if n == max_players
        ));
    }

    #[test]
    fn test_three_player_game() {
        let secrets = [word(1), word(2), word(3)];
        let (mut game, players) = full_game(&secrets);

        for (player, secret) in players.iter().zip(secrets) {
            game.reveal(*player, secret).unwrap();
        }

        let draw = game.settle().unwrap();
        // 1 ^ 2 ^ 3 = 0
        assert_eq!(
            draw.hash().to_string(),
            "290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
        );
        assert_eq!(draw.winner(), 0);
        assert_eq!(draw.players(), 3);
    }

    #[test]
    fn test_game_matches_draw() {
        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let secrets: Vec<_> = (0..5).map(|_| Secret::random(&mut rng)).collect();
        let (mut game, players) = full_game(&secrets);

        for (player, secret) in players.iter().rev().zip(secrets.iter().rev()) {
            game.reveal(*player, secret.clone()).unwrap();
        }

        assert_eq!(
            game.settle().unwrap(),
            Draw::from_secrets(&secrets, Default::default()).unwrap()
        );
    }

    #[test]
    fn test_join_rejects_zero_commitment() {
        let mut game = Game::new(2).unwrap();

        let err = game.join(Hash::from([0u8; 32])).unwrap_err();
        assert!(matches!(err, GameError::Commitment(CommitmentError::Zero)));
        assert_eq!(game.players(), 0);
    }

    #[test]
    fn test_join_full_game() {
        let (mut game, _) = full_game(&[word(1), word(2)]);

        assert!(game.is_full());
        assert!(matches!(
            game.join(commit::commit(b"late")).unwrap_err(),
            GameError::Full
        ));
    }

    #[test]
    fn test_join_repeated_commitment() {
        let mut game = Game::new(3).unwrap();
        let (_, commitment) = Secret::parse("abc").hash_commit();

        let player = game.join(commitment).unwrap();
        assert_eq!(game.commitment(player), Some(&commitment));
        assert!(matches!(
            game.join(commitment).unwrap_err(),
            GameError::AlreadyJoined(p) if p == player
        ));
        assert_eq!(game.players(), 1);
    }

    #[test]
    fn test_reveal_before_full() {
        let mut game = Game::new(3).unwrap();
        let player = game.join(commit::commit(b"abc")).unwrap();

        assert!(matches!(
            game.reveal(player, Secret::parse("abc")).unwrap_err(),
            GameError::NotStarted(2)
        ));
    }

    #[test]
    fn test_reveal_twice() {
        let (mut game, players) = full_game(&[word(1), word(2)]);

        game.reveal(players[0], word(1)).unwrap();
        assert!(game.has_revealed(players[0]));
        assert!(matches!(
            game.reveal(players[0], word(1)).unwrap_err(),
            GameError::AlreadyRevealed(p) if p == players[0]
        ));
    }

    #[test]
    fn test_reveal_mismatch() {
        let (mut game, players) = full_game(&[word(1), word(2)]);

        let err = game.reveal(players[1], word(3)).unwrap_err();
        assert!(err.is_cheating());
        assert!(!game.has_revealed(players[1]));
    }

    #[test]
    fn test_reveal_unknown_player() {
        let (mut game, _) = full_game(&[word(1), word(2)]);

        assert!(matches!(
            game.reveal(PlayerId(2), word(3)).unwrap_err(),
            GameError::UnknownPlayer(PlayerId(2))
        ));
    }

    #[test]
    fn test_reveal_overlong_secret() {
        let long = Secret::new(vec![0xaa; 40]);
        let (mut game, players) = full_game(&[long.clone(), word(2)]);

        let err = game.reveal(players[0], long).unwrap_err();
        assert!(matches!(
            err,
            GameError::Draw(DrawError::Secret(SecretError::TooLong { len: 40, .. }))
        ));
        assert!(!err.is_cheating());
    }

    #[test]
    fn test_settle_pending_reveals() {
        let (mut game, players) = full_game(&[word(1), word(2), word(3)]);
        game.reveal(players[1], word(2)).unwrap();

        assert!(matches!(
            game.settle().unwrap_err(),
            GameError::PendingReveals(2)
        ));
    }
}
