use std::collections::{HashMap, VecDeque};

use mazerun::{
    game::{GameSession, GameSettings, GameStatus, MoveOutcome},
    generators::GeneratorKind,
    leaderboard::Leaderboard,
    maze::{Direction, Grid, Position},
};

/// Shortest route from `from` to the finish, as moves.
fn route_to_finish(grid: &Grid, from: Position) -> Option<Vec<Direction>> {
    let finish = grid.find_finish()?;
    let mut came_from: HashMap<Position, (Position, Direction)> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    while let Some(pos) = queue.pop_front() {
        if pos == finish {
            let mut route = Vec::new();
            let mut cur = pos;
            while let Some(&(prev, dir)) = came_from.get(&cur) {
                route.push(dir);
                cur = prev;
            }
            route.reverse();
            return Some(route);
        }
        for dir in Direction::ALL {
            let Some(next) = pos.step(dir, 1) else {
                continue;
            };
            if next != from && grid.is_walkable(next) && !came_from.contains_key(&next) {
                came_from.insert(next, (pos, dir));
                queue.push_back(next);
            }
        }
    }
    None
}

#[test]
fn test_play_to_the_finish() {
    for generator in [
        GeneratorKind::RecurBacktrack,
        GeneratorKind::RoomsAndCorridors,
        GeneratorKind::Prim,
    ] {
        let settings = GameSettings {
            width: 25,
            height: 17,
            generator,
            seed: Some(42),
            ..GameSettings::default()
        };
        let mut session = GameSession::new(settings).unwrap();
        let route = route_to_finish(session.grid(), session.player().position)
            .unwrap_or_else(|| panic!("{generator} maze has no route\n{}", session.grid()));

        let (last, rest) = route.split_last().unwrap();
        for &dir in rest {
            assert!(matches!(
                session.attempt_move(dir),
                MoveOutcome::Moved(_)
            ));
            assert_eq!(session.status(), GameStatus::Playing);
        }
        assert_eq!(
            session.attempt_move(*last),
            MoveOutcome::Won(session.maze().finish())
        );
        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.moves() as usize, route.len());

        let result = session.result().unwrap();
        assert_eq!(result.moves as usize, route.len());

        let mut board = Leaderboard::new();
        assert_eq!(board.record("tester", result), Ok(Some(0)));
        assert_eq!(board.top(1)[0].moves, result.moves);

        // A fresh maze after reset is playable again
        session.reset().unwrap();
        assert_eq!(session.status(), GameStatus::Playing);
        assert_eq!(session.moves(), 0);
        assert!(route_to_finish(session.grid(), session.player().position).is_some());
    }
}

#[test]
fn test_walls_never_count_as_moves() {
    let mut session = GameSession::new(GameSettings {
        seed: Some(7),
        ..GameSettings::default()
    })
    .unwrap();
    let start = session.player().position;
    // The start sits in the top-left interior corner, so up and left are border walls
    assert_eq!(session.attempt_move(Direction::Up), MoveOutcome::Blocked);
    assert_eq!(session.attempt_move(Direction::Left), MoveOutcome::Blocked);
    assert_eq!(session.moves(), 0);
    assert_eq!(session.player().position, start);
    assert_eq!(session.player().direction, Direction::Right);
}
