use xiangqi::{
    iccs::Iccs,
    packed::PackedBoard,
    view::{BasicRules, BoardView, ChessBoardExposed, IllegalMoveKinds, NoRedraw},
    Board, Move, MovedPayload, Point, Side,
};

fn play(view: &mut BoardView<BasicRules, NoRedraw>, iccs: &str) -> MovedPayload {
    let m = Move::from(iccs.parse::<Iccs>().expect("valid iccs"));
    let id = view
        .board()
        .piece_at(m.from)
        .expect("piece on origin")
        .id()
        .clone();
    view.commit_move(&id, m.to).expect("legal move")
}

#[test]
fn test_opening_with_capture() {
    let mut view = BoardView::new(Board::initial(), BasicRules, NoRedraw);
    view.enforce_turns(Side::Red);

    let payload = play(&mut view, "h2e2");
    assert_eq!(payload.to_move(), Some("7747".parse().unwrap()));
    assert_eq!(view.turn(), Some(Side::Black));

    // Red may not move twice.
    let cannon = view.board().piece_at(Point::new(4, 7).unwrap()).unwrap().clone();
    assert!(!view.validate_move(&cannon, 4, 3));
    assert!(view
        .check_move(&cannon, 4, 3)
        .contains(IllegalMoveKinds::WRONG_TURN));

    play(&mut view, "b9c7");

    let payload = play(&mut view, "e2e6");
    let captured = payload.captured_piece.as_ref().expect("capture");
    assert_eq!(captured.side(), Side::Black);
    assert_eq!(captured.id().as_str(), "black-pawn-3");
    assert!(!view.board().by_id("black-pawn-3").unwrap().is_on_board());

    let mut packed = PackedBoard::initial();
    for m in ["7747", "1022", "4743"] {
        packed.apply(m.parse().unwrap()).unwrap();
    }
    assert_eq!(view.packed(), Ok(packed.clone()));
    assert_eq!(packed.get(29), None);
    assert_eq!(&packed.to_string()[58..60], "99");

    assert_eq!(
        view.fen(Side::Black).to_string(),
        "r1bakabnr/9/1cn4c1/p1p1C1p1p/9/9/P1P1P1P1P/1C7/9/RNBAKABNR b - - 0 1"
    );
    assert_eq!(view.history().len(), 3);
}

#[test]
fn test_reset_starts_new_game() {
    let mut view = BoardView::new(Board::initial(), BasicRules, NoRedraw);
    view.enforce_turns(Side::Red);
    play(&mut view, "h2e2");
    play(&mut view, "h9g7");
    play(&mut view, "e2e6");

    view.reset_selection_and_redraw();
    assert_eq!(view.history().len(), 3);

    view.reset();
    assert_eq!(view.packed(), Ok(PackedBoard::initial()));
    assert_eq!(view.turn(), Some(Side::Red));
    assert!(view.history().is_empty());
    assert!(view
        .board()
        .pieces()
        .iter()
        .all(|piece| piece.is_on_board() && piece.position() == piece.original()));
}

#[test]
fn test_resume_from_backend_code() {
    let mut packed = PackedBoard::initial();
    packed.apply("7747".parse().unwrap()).unwrap();
    let code = packed.to_string();

    let board = Board::from_packed(&code.parse().unwrap());
    let cannon = board.by_id("red-cannon-2").unwrap();
    assert_eq!(cannon.position(), Point::new(4, 7));
    assert_eq!(cannon.original(), Point::new(7, 7));
    assert_eq!(board.to_packed(), Ok(packed));
}

#[cfg(feature = "serde")]
#[test]
fn test_capture_event_wire_shape() {
    let mut view = BoardView::new(Board::initial(), BasicRules, NoRedraw);
    play(&mut view, "h2e2");
    let payload = play(&mut view, "e2e6");

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["movedPiece"]["id"], "red-cannon-2");
    assert_eq!(json["movedPiece"]["type"], "red");
    assert_eq!(json["movedPiece"]["x"], 4);
    assert_eq!(json["movedPiece"]["y"], 7);
    assert_eq!(json["toX"], 4);
    assert_eq!(json["toY"], 3);
    assert_eq!(json["capturedPiece"]["type"], "black");
    assert_eq!(json["capturedPiece"]["isActiveOnBoard"], true);

    let decoded: MovedPayload = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, payload);
}
