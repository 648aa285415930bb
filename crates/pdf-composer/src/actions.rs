use lopdf::{Dictionary, Object, ObjectId, dictionary};
use toclink_types::{Point, Rect};

/// An explicit `[page /XYZ left top null]` destination; a null zoom keeps
/// the viewer's current zoom.
pub fn xyz_destination(page_id: ObjectId, point: Point) -> Object {
    Object::Array(vec![
        Object::Reference(page_id),
        "XYZ".into(),
        Object::Real(point.x as f32),
        Object::Real(point.y as f32),
        Object::Null,
    ])
}

/// A `GoTo` action jumping to `point` on `page_id`.
pub fn goto_action(page_id: ObjectId, point: Point) -> Dictionary {
    dictionary! {
        "Type" => "Action",
        "S" => "GoTo",
        "D" => xyz_destination(page_id, point),
    }
}

/// A link annotation that triggers a `GoTo` action when `rect` is clicked.
pub fn goto_link_annotation(rect: &Rect, page_id: ObjectId, point: Point) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => rect_array(rect),
        "Border" => vec![0.into(), 0.into(), 0.into()],
        "A" => goto_action(page_id, point),
    }
}

pub fn rect_array(rect: &Rect) -> Vec<Object> {
    [rect.x1, rect.y1, rect.x2, rect.y2]
        .into_iter()
        .map(|v| Object::Real(v as f32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goto_points_at_page_and_coordinates() {
        let action = goto_action((7, 0), Point::new(0.0, 136.0));
        assert_eq!(action.get(b"S").unwrap().as_name().unwrap(), b"GoTo");
        let dest = action.get(b"D").unwrap().as_array().unwrap();
        assert_eq!(dest[0].as_reference().unwrap(), (7, 0));
        assert_eq!(dest[1].as_name().unwrap(), b"XYZ");
        assert_eq!(dest[3].as_float().unwrap(), 136.0);
        assert!(matches!(dest[4], Object::Null));
    }

    #[test]
    fn link_annotation_keeps_the_clickable_area() {
        let rect = Rect::from_corners((10.0, 20.0), (110.0, 34.0));
        let annot = goto_link_annotation(&rect, (3, 0), Point::zero());
        let stored = annot.get(b"Rect").unwrap().as_array().unwrap();
        let values: Vec<f32> = stored.iter().map(|v| v.as_float().unwrap()).collect();
        assert_eq!(values, vec![10.0, 20.0, 110.0, 34.0]);
        assert_eq!(annot.get(b"Subtype").unwrap().as_name().unwrap(), b"Link");
    }
}
